use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用戶檔案，由 /set_profile 對話收集
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub activity_minutes: u32,
    pub city: String,
}

/// 單個用戶的當日累計數據
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub profile: UserProfile,
    pub water_goal_ml: u32,
    pub calorie_goal_kcal: u32,
    pub logged_water_ml: u32,
    pub logged_calories_kcal: f64,
    pub burned_calories_kcal: u32,
    pub history: Vec<HistoryEntry>,
}

impl UserData {
    pub fn new(profile: UserProfile, water_goal_ml: u32, calorie_goal_kcal: u32) -> Self {
        Self {
            profile,
            water_goal_ml,
            calorie_goal_kcal,
            logged_water_ml: 0,
            logged_calories_kcal: 0.0,
            burned_calories_kcal: 0,
            history: Vec::new(),
        }
    }

    pub fn water_remaining_ml(&self) -> u32 {
        self.water_goal_ml.saturating_sub(self.logged_water_ml)
    }

    /// 熱量平衡 = 攝入 − 消耗
    pub fn calorie_balance_kcal(&self) -> f64 {
        self.logged_calories_kcal - f64::from(self.burned_calories_kcal)
    }

    pub fn record(&mut self, kind: HistoryKind, amount: f64) {
        self.history.push(HistoryEntry {
            at: Utc::now(),
            kind,
            amount,
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub kind: HistoryKind,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Water,
    Food,
    Workout,
}

/// 食品查詢結果：每 100 克的熱量
#[derive(Debug, Clone, PartialEq)]
pub struct FoodInfo {
    pub name: String,
    pub kcal_per_100g: f64,
}
