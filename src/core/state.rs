use crate::domain::model::{FoodInfo, UserData};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 每個用戶的對話位置；profile 步驟一邊走一邊累積答案
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingWeight,
    AwaitingHeight {
        weight: f64,
    },
    AwaitingAge {
        weight: f64,
        height: f64,
    },
    AwaitingActivity {
        weight: f64,
        height: f64,
        age: u32,
    },
    AwaitingCity {
        weight: f64,
        height: f64,
        age: u32,
        activity: u32,
    },
    AwaitingGrams {
        food: FoodInfo,
    },
}

/// 全部狀態都在記憶體裡，重啟即歸零
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<i64, UserData>,
    states: HashMap<i64, ConversationState>,
}

impl InMemoryStore {
    pub fn state(&self, user_id: i64) -> ConversationState {
        self.states.get(&user_id).cloned().unwrap_or_default()
    }

    pub fn set_state(&mut self, user_id: i64, state: ConversationState) {
        self.states.insert(user_id, state);
    }

    pub fn clear_state(&mut self, user_id: i64) {
        self.states.remove(&user_id);
    }

    pub fn user(&self, user_id: i64) -> Option<&UserData> {
        self.users.get(&user_id)
    }

    pub fn user_mut(&mut self, user_id: i64) -> Option<&mut UserData> {
        self.users.get_mut(&user_id)
    }

    pub fn has_user(&self, user_id: i64) -> bool {
        self.users.contains_key(&user_id)
    }

    pub fn insert_user(&mut self, user_id: i64, data: UserData) {
        self.users.insert(user_id, data);
    }
}

pub type SharedStore = Arc<Mutex<InMemoryStore>>;

pub fn new_shared_store() -> SharedStore {
    Arc::new(Mutex::new(InMemoryStore::default()))
}
