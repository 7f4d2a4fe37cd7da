use crate::core::chart::ProgressChart;
use crate::core::state::{ConversationState, SharedStore};
use crate::domain::model::{HistoryKind, UserData, UserProfile};
use crate::domain::ports::{MessageGateway, NutritionProvider, WeatherProvider};
use crate::domain::{foods, goals, workouts};
use crate::utils::error::Result;
use crate::utils::validation::parse_flexible_number;
use rand::seq::SliceRandom;

const PROFILE_REQUIRED: &str = "Сначала настройте профиль командой /set_profile";

const WATER_TIPS: [&str; 4] = [
    "Держите бутылку воды рядом с собой",
    "Пейте стакан воды перед каждым приёмом пищи",
    "Установите напоминания на телефоне",
    "Добавьте в воду лимон или мяту для вкуса",
];

/// 所有指令的實作；gateway / weather / nutrition 都走 trait，方便替換與測試
pub struct BotHandlers<G, W, N> {
    gateway: G,
    weather: W,
    nutrition: N,
    store: SharedStore,
}

impl<G, W, N> BotHandlers<G, W, N>
where
    G: MessageGateway,
    W: WeatherProvider,
    N: NutritionProvider,
{
    pub fn new(gateway: G, weather: W, nutrition: N, store: SharedStore) -> Self {
        Self {
            gateway,
            weather,
            nutrition,
            store,
        }
    }

    pub async fn cmd_start(&self, chat_id: i64) -> Result<()> {
        self.gateway
            .send_text(
                chat_id,
                "Привет! Я бот для отслеживания питания, воды и активности.\n\n\
                 Доступные команды:\n\
                 /set_profile - Настроить профиль\n\
                 /log_water <мл> - Записать выпитую воду\n\
                 /log_food <продукт> - Записать еду\n\
                 /log_workout <тип> <минуты> - Записать тренировку\n\
                 /check_progress - Показать прогресс\n\
                 /show_graph - Показать графики прогресса\n\
                 /recommendations - Получить рекомендации",
            )
            .await
    }

    pub async fn cmd_set_profile(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.store
            .lock()
            .await
            .set_state(user_id, ConversationState::AwaitingWeight);
        self.gateway
            .send_text(chat_id, "Введите ваш вес (в кг):")
            .await
    }

    /// 對話中的下一條訊息按當前狀態處理
    pub async fn handle_state_input(
        &self,
        chat_id: i64,
        user_id: i64,
        text: &str,
        state: ConversationState,
    ) -> Result<()> {
        match state {
            ConversationState::Idle => Ok(()),
            ConversationState::AwaitingWeight => match parse_flexible_number(text) {
                Some(weight) if weight > 0.0 && weight <= 500.0 => {
                    self.store
                        .lock()
                        .await
                        .set_state(user_id, ConversationState::AwaitingHeight { weight });
                    self.gateway
                        .send_text(chat_id, "Введите ваш рост (в см):")
                        .await
                }
                _ => {
                    self.gateway
                        .send_text(chat_id, "Пожалуйста, введите корректный вес (число в кг):")
                        .await
                }
            },
            ConversationState::AwaitingHeight { weight } => match parse_flexible_number(text) {
                Some(height) if height > 0.0 && height <= 300.0 => {
                    self.store
                        .lock()
                        .await
                        .set_state(user_id, ConversationState::AwaitingAge { weight, height });
                    self.gateway.send_text(chat_id, "Введите ваш возраст:").await
                }
                _ => {
                    self.gateway
                        .send_text(chat_id, "Пожалуйста, введите корректный рост (число в см):")
                        .await
                }
            },
            ConversationState::AwaitingAge { weight, height } => {
                match text.trim().parse::<u32>() {
                    Ok(age) if age > 0 && age <= 150 => {
                        self.store.lock().await.set_state(
                            user_id,
                            ConversationState::AwaitingActivity {
                                weight,
                                height,
                                age,
                            },
                        );
                        self.gateway
                            .send_text(chat_id, "Сколько минут активности у вас в день?")
                            .await
                    }
                    _ => {
                        self.gateway
                            .send_text(
                                chat_id,
                                "Пожалуйста, введите корректный возраст (целое число):",
                            )
                            .await
                    }
                }
            }
            ConversationState::AwaitingActivity {
                weight,
                height,
                age,
            } => match text.trim().parse::<u32>() {
                Ok(activity) if activity <= 1440 => {
                    self.store.lock().await.set_state(
                        user_id,
                        ConversationState::AwaitingCity {
                            weight,
                            height,
                            age,
                            activity,
                        },
                    );
                    self.gateway
                        .send_text(chat_id, "В каком городе вы находитесь?")
                        .await
                }
                _ => {
                    self.gateway
                        .send_text(chat_id, "Пожалуйста, введите корректное количество минут:")
                        .await
                }
            },
            ConversationState::AwaitingCity {
                weight,
                height,
                age,
                activity,
            } => {
                self.finish_profile(chat_id, user_id, weight, height, age, activity, text.trim())
                    .await
            }
            ConversationState::AwaitingGrams { food } => match parse_flexible_number(text) {
                Some(grams) if grams > 0.0 => {
                    let calories = (food.kcal_per_100g / 100.0) * grams;
                    {
                        let mut store = self.store.lock().await;
                        if let Some(user) = store.user_mut(user_id) {
                            user.logged_calories_kcal += calories;
                            user.record(HistoryKind::Food, calories);
                        }
                        store.clear_state(user_id);
                    }
                    self.gateway
                        .send_text(
                            chat_id,
                            &format!(
                                "Записано: {:.1} ккал ({:.0} г {}).",
                                calories, grams, food.name
                            ),
                        )
                        .await
                }
                _ => {
                    self.gateway
                        .send_text(
                            chat_id,
                            "Пожалуйста, введите корректное количество в граммах:",
                        )
                        .await
                }
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn finish_profile(
        &self,
        chat_id: i64,
        user_id: i64,
        weight: f64,
        height: f64,
        age: u32,
        activity: u32,
        city: &str,
    ) -> Result<()> {
        // 氣溫查詢不能擋住對話，失敗就按無天氣計算
        let temperature = self.weather.current_temperature(city).await;

        let water_goal = goals::water_goal_ml(weight, activity, temperature);
        let calorie_goal = goals::calorie_goal_kcal(weight, height, age, activity);

        let profile = UserProfile {
            weight_kg: weight,
            height_cm: height,
            age_years: age,
            activity_minutes: activity,
            city: city.to_string(),
        };
        {
            let mut store = self.store.lock().await;
            store.insert_user(user_id, UserData::new(profile, water_goal, calorie_goal));
            store.clear_state(user_id);
        }

        let weather_info = match temperature {
            Some(t) => format!("Температура в {}: {:.1}C", city, t),
            None => format!("Не удалось получить погоду для {}", city),
        };

        self.gateway
            .send_text(
                chat_id,
                &format!(
                    "Профиль сохранён!\n\n\
                     Вес: {} кг\n\
                     Рост: {} см\n\
                     Возраст: {} лет\n\
                     Активность: {} мин/день\n\
                     Город: {}\n\n\
                     {}\n\n\
                     Ваши дневные нормы:\n\
                     Вода: {} мл\n\
                     Калории: {} ккал",
                    weight, height, age, activity, city, weather_info, water_goal, calorie_goal
                ),
            )
            .await
    }

    pub async fn cmd_log_water(&self, chat_id: i64, user_id: i64, args: &str) -> Result<()> {
        if !self.ensure_profile(chat_id, user_id).await? {
            return Ok(());
        }

        let Some(raw_amount) = args.split_whitespace().next() else {
            return self
                .gateway
                .send_text(
                    chat_id,
                    "Использование: /log_water <количество мл>\nПример: /log_water 250",
                )
                .await;
        };

        match raw_amount.parse::<u32>() {
            Ok(amount) if amount > 0 => {
                let (logged, goal) = {
                    let mut store = self.store.lock().await;
                    let user = match store.user_mut(user_id) {
                        Some(user) => user,
                        None => return Ok(()),
                    };
                    user.logged_water_ml += amount;
                    user.record(HistoryKind::Water, f64::from(amount));
                    (user.logged_water_ml, user.water_goal_ml)
                };
                let remaining = goal.saturating_sub(logged);
                self.gateway
                    .send_text(
                        chat_id,
                        &format!(
                            "Записано: {} мл воды.\n\n\
                             Выпито за день: {} мл из {} мл.\n\
                             Осталось: {} мл.",
                            amount, logged, goal, remaining
                        ),
                    )
                    .await
            }
            _ => {
                self.gateway
                    .send_text(
                        chat_id,
                        "Пожалуйста, введите корректное количество воды в мл.",
                    )
                    .await
            }
        }
    }

    pub async fn cmd_log_food(&self, chat_id: i64, user_id: i64, args: &str) -> Result<()> {
        if !self.ensure_profile(chat_id, user_id).await? {
            return Ok(());
        }

        let product = args.trim();
        if product.is_empty() {
            return self
                .gateway
                .send_text(
                    chat_id,
                    "Использование: /log_food <название продукта>\nПример: /log_food банан",
                )
                .await;
        }

        // 先查本地表，查不到再問外部 API
        let food = match foods::find_in_local_db(product) {
            Some(food) => Some(food),
            None => self.nutrition.find_food(product).await,
        };

        let Some(food) = food.filter(|f| f.kcal_per_100g != 0.0) else {
            return self
                .gateway
                .send_text(
                    chat_id,
                    &format!(
                        "Не удалось найти информацию о продукте '{}'.\n\
                         Попробуйте ввести название на английском или другой продукт.",
                        product
                    ),
                )
                .await;
        };

        let prompt = format!(
            "{} — {} ккал на 100 г.\nСколько грамм вы съели?",
            food.name, food.kcal_per_100g
        );
        self.store
            .lock()
            .await
            .set_state(user_id, ConversationState::AwaitingGrams { food });
        self.gateway.send_text(chat_id, &prompt).await
    }

    pub async fn cmd_log_workout(&self, chat_id: i64, user_id: i64, args: &str) -> Result<()> {
        if !self.ensure_profile(chat_id, user_id).await? {
            return Ok(());
        }

        let mut tokens = args.split_whitespace();
        let (Some(raw_type), Some(raw_minutes)) = (tokens.next(), tokens.next()) else {
            let workout_types = workouts::known_workout_types().join(", ");
            return self
                .gateway
                .send_text(
                    chat_id,
                    &format!(
                        "Использование: /log_workout <тип> <минуты>\n\
                         Пример: /log_workout бег 30\n\n\
                         Доступные типы тренировок: {}",
                        workout_types
                    ),
                )
                .await;
        };

        let workout_type = raw_type.to_lowercase();
        let minutes = match raw_minutes.parse::<u32>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                return self
                    .gateway
                    .send_text(
                        chat_id,
                        "Пожалуйста, введите корректное время тренировки в минутах.",
                    )
                    .await;
            }
        };

        let burned = workouts::burned_calories(&workout_type, minutes);
        let extra_water = workouts::extra_water_ml(minutes);
        {
            let mut store = self.store.lock().await;
            if let Some(user) = store.user_mut(user_id) {
                user.burned_calories_kcal += burned;
                user.water_goal_ml += extra_water;
                user.record(HistoryKind::Workout, f64::from(burned));
            }
        }

        self.gateway
            .send_text(
                chat_id,
                &format!(
                    "{} {} {} минут — {} ккал сожжено.\n\
                     Дополнительно: выпейте {} мл воды.",
                    workouts::workout_emoji(&workout_type),
                    capitalize(&workout_type),
                    minutes,
                    burned,
                    extra_water
                ),
            )
            .await
    }

    pub async fn cmd_check_progress(&self, chat_id: i64, user_id: i64) -> Result<()> {
        if !self.ensure_profile(chat_id, user_id).await? {
            return Ok(());
        }

        let user = match self.snapshot(user_id).await {
            Some(user) => user,
            None => return Ok(()),
        };

        self.gateway
            .send_text(
                chat_id,
                &format!(
                    "📊 Прогресс:\n\n💧 Вода:\n  • Выпито: {} мл из {} мл\n  • Осталось: {} мл\n\n🍽 Калории:\n  • Потреблено: {:.0} ккал из {} ккал\n  • Сожжено: {} ккал\n  • Баланс: {:.0} ккал",
                    user.logged_water_ml,
                    user.water_goal_ml,
                    user.water_remaining_ml(),
                    user.logged_calories_kcal,
                    user.calorie_goal_kcal,
                    user.burned_calories_kcal,
                    user.calorie_balance_kcal()
                ),
            )
            .await
    }

    pub async fn cmd_show_graph(&self, chat_id: i64, user_id: i64) -> Result<()> {
        if !self.ensure_profile(chat_id, user_id).await? {
            return Ok(());
        }

        let user = match self.snapshot(user_id).await {
            Some(user) => user,
            None => return Ok(()),
        };

        let chart = ProgressChart::from_user(&user);
        match chart.render_png() {
            Ok(png) => {
                self.gateway
                    .send_photo(chat_id, png, "progress.png", &chart.caption())
                    .await
            }
            Err(e) => {
                tracing::warn!("📉 Chart rendering failed, sending text instead: {}", e);
                self.cmd_check_progress(chat_id, user_id).await
            }
        }
    }

    pub async fn cmd_recommendations(&self, chat_id: i64, user_id: i64) -> Result<()> {
        if !self.ensure_profile(chat_id, user_id).await? {
            return Ok(());
        }

        let user = match self.snapshot(user_id).await {
            Some(user) => user,
            None => return Ok(()),
        };

        let calorie_goal = f64::from(user.calorie_goal_kcal);
        let burned = user.burned_calories_kcal;
        let balance = user.calorie_balance_kcal();
        let remaining_calories = calorie_goal - balance;
        let water_remaining =
            i64::from(user.water_goal_ml) - i64::from(user.logged_water_ml);

        let mut parts: Vec<String> = vec!["💡 *Рекомендации для вас:*\n".to_string()];

        if balance >= calorie_goal {
            parts.push("⚠️ *Калории:* Вы уже достигли дневной нормы калорий!\n".to_string());
            parts.push("Рекомендуемые тренировки для сжигания лишних калорий:\n".to_string());
            for workout in &workouts::WORKOUT_RECOMMENDATIONS[..3] {
                parts.push(format!(
                    "  • {} ({} мин) — сожжёт ~{} ккал\n    _{}_\n",
                    capitalize(workout.kind),
                    workout.duration_min,
                    workout.calories,
                    workout.description
                ));
            }
        } else if remaining_calories > 500.0 {
            parts.push(format!(
                "🍽 *Калории:* Осталось {:.0} ккал до нормы.\n",
                remaining_calories
            ));
            parts.push("Вы можете съесть что-нибудь питательное!\n\n".to_string());
        } else {
            parts.push(format!(
                "🍽 *Калории:* Осталось всего {:.0} ккал.\n",
                remaining_calories
            ));
            parts.push("Рекомендуем низкокалорийные продукты:\n".to_string());
            let sampled: Vec<foods::LowCalorieFood> = {
                let mut rng = rand::thread_rng();
                foods::LOW_CALORIE_FOODS
                    .choose_multiple(&mut rng, 5)
                    .cloned()
                    .collect()
            };
            for food in sampled {
                parts.push(format!(
                    "  • {} — {} ккал/100г\n    _{}_\n",
                    food.name, food.kcal_per_100g, food.benefit
                ));
            }
        }

        parts.push("\n".to_string());

        if water_remaining > 0 {
            parts.push(format!(
                "💧 *Вода:* Осталось выпить {} мл.\n",
                water_remaining
            ));
            let glasses = water_remaining / 250;
            if glasses > 0 {
                parts.push(format!("Это примерно {} стакан(ов) воды.\n", glasses));
            }
            let tip = {
                let mut rng = rand::thread_rng();
                WATER_TIPS
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(WATER_TIPS[0])
            };
            parts.push(format!("\n💡 Совет: {}", tip));
        } else {
            parts.push("💧 *Вода:* Отлично! Вы выполнили норму воды! 🎉".to_string());
        }

        parts.push("\n\n".to_string());

        if burned < 200 {
            parts.push("🏋️ *Тренировки:* Сегодня вы ещё мало двигались!\n".to_string());
            parts.push("Попробуйте одну из этих тренировок:\n".to_string());
            for workout in &workouts::WORKOUT_RECOMMENDATIONS[..3] {
                parts.push(format!(
                    "  • /log_workout {} {}\n",
                    workout.kind, workout.duration_min
                ));
            }
        } else {
            parts.push(format!(
                "🏋️ *Тренировки:* Отлично! Вы уже сожгли {} ккал! 💪",
                burned
            ));
        }

        self.gateway.send_markdown(chat_id, &parts.concat()).await
    }

    async fn ensure_profile(&self, chat_id: i64, user_id: i64) -> Result<bool> {
        let registered = self.store.lock().await.has_user(user_id);
        if !registered {
            self.gateway.send_text(chat_id, PROFILE_REQUIRED).await?;
        }
        Ok(registered)
    }

    async fn snapshot(&self, user_id: i64) -> Option<UserData> {
        self.store.lock().await.user(user_id).cloned()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::new_shared_store;
    use crate::domain::model::FoodInfo;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Text { chat_id: i64, text: String },
        Markdown { chat_id: i64, text: String },
        Photo { chat_id: i64, caption: String },
    }

    #[derive(Clone, Default)]
    struct MockGateway {
        sent: Arc<Mutex<Vec<Sent>>>,
    }

    impl MockGateway {
        fn last(&self) -> Sent {
            self.sent.lock().unwrap().last().cloned().expect("no messages sent")
        }

        fn last_text(&self) -> String {
            match self.last() {
                Sent::Text { text, .. } | Sent::Markdown { text, .. } => text,
                Sent::Photo { caption, .. } => caption,
            }
        }
    }

    #[async_trait]
    impl MessageGateway for MockGateway {
        async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(Sent::Text {
                chat_id,
                text: text.to_string(),
            });
            Ok(())
        }

        async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(Sent::Markdown {
                chat_id,
                text: text.to_string(),
            });
            Ok(())
        }

        async fn send_photo(
            &self,
            chat_id: i64,
            _png_bytes: Vec<u8>,
            _filename: &str,
            caption: &str,
        ) -> Result<()> {
            self.sent.lock().unwrap().push(Sent::Photo {
                chat_id,
                caption: caption.to_string(),
            });
            Ok(())
        }
    }

    struct StubWeather(Option<f64>);

    #[async_trait]
    impl WeatherProvider for StubWeather {
        async fn current_temperature(&self, _city: &str) -> Option<f64> {
            self.0
        }
    }

    struct StubNutrition(Option<FoodInfo>);

    #[async_trait]
    impl NutritionProvider for StubNutrition {
        async fn find_food(&self, _query: &str) -> Option<FoodInfo> {
            self.0.clone()
        }
    }

    type TestHandlers = BotHandlers<MockGateway, StubWeather, StubNutrition>;

    fn handlers_with(
        temperature: Option<f64>,
        api_food: Option<FoodInfo>,
    ) -> (TestHandlers, MockGateway, SharedStore) {
        let gateway = MockGateway::default();
        let store = new_shared_store();
        let handlers = BotHandlers::new(
            gateway.clone(),
            StubWeather(temperature),
            StubNutrition(api_food),
            store.clone(),
        );
        (handlers, gateway, store)
    }

    async fn register_profile(handlers: &TestHandlers, user_id: i64) {
        handlers.cmd_set_profile(user_id, user_id).await.unwrap();
        for input in ["70", "175", "30", "60", "Москва"] {
            let state = handlers.store.lock().await.state(user_id);
            handlers
                .handle_state_input(user_id, user_id, input, state)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_start_lists_commands() {
        let (handlers, gateway, _) = handlers_with(None, None);
        handlers.cmd_start(1).await.unwrap();
        let text = gateway.last_text();
        assert!(text.contains("/set_profile"));
        assert!(text.contains("/log_workout"));
    }

    #[tokio::test]
    async fn test_commands_require_profile() {
        let (handlers, gateway, _) = handlers_with(None, None);
        handlers.cmd_log_water(1, 1, "250").await.unwrap();
        assert_eq!(
            gateway.last(),
            Sent::Text {
                chat_id: 1,
                text: PROFILE_REQUIRED.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_profile_dialog_computes_goals() {
        let (handlers, gateway, store) = handlers_with(Some(26.0), None);
        register_profile(&handlers, 1).await;

        let store = store.lock().await;
        let user = store.user(1).unwrap();
        // 2100 + 1000 + 500 (hot day)
        assert_eq!(user.water_goal_ml, 3600);
        assert_eq!(user.calorie_goal_kcal, 1943);
        assert_eq!(store.state(1), ConversationState::Idle);
        drop(store);

        let text = gateway.last_text();
        assert!(text.contains("Профиль сохранён!"));
        assert!(text.contains("Температура в Москва: 26.0C"));
    }

    #[tokio::test]
    async fn test_profile_dialog_survives_weather_outage() {
        let (handlers, gateway, store) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        assert_eq!(store.lock().await.user(1).unwrap().water_goal_ml, 3100);
        assert!(gateway
            .last_text()
            .contains("Не удалось получить погоду для Москва"));
    }

    #[tokio::test]
    async fn test_invalid_weight_reprompts_without_advancing() {
        let (handlers, gateway, store) = handlers_with(None, None);
        handlers.cmd_set_profile(1, 1).await.unwrap();

        for bad_input in ["сто", "0", "700"] {
            let state = store.lock().await.state(1);
            handlers
                .handle_state_input(1, 1, bad_input, state)
                .await
                .unwrap();
            assert_eq!(store.lock().await.state(1), ConversationState::AwaitingWeight);
            assert!(gateway.last_text().contains("корректный вес"));
        }
    }

    #[tokio::test]
    async fn test_log_water_accumulates_and_reports_remaining() {
        let (handlers, gateway, store) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_log_water(1, 1, "250").await.unwrap();
        handlers.cmd_log_water(1, 1, "500").await.unwrap();

        assert_eq!(store.lock().await.user(1).unwrap().logged_water_ml, 750);
        let text = gateway.last_text();
        assert!(text.contains("Записано: 500 мл воды."));
        assert!(text.contains("Выпито за день: 750 мл из 3100 мл."));
        assert!(text.contains("Осталось: 2350 мл."));
    }

    #[tokio::test]
    async fn test_log_water_rejects_garbage() {
        let (handlers, gateway, _) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_log_water(1, 1, "").await.unwrap();
        assert!(gateway.last_text().contains("Использование: /log_water"));

        handlers.cmd_log_water(1, 1, "-5").await.unwrap();
        assert!(gateway
            .last_text()
            .contains("корректное количество воды"));
    }

    #[tokio::test]
    async fn test_log_workout_burns_calories_and_raises_water_goal() {
        let (handlers, gateway, store) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_log_workout(1, 1, "бег 45").await.unwrap();

        let store = store.lock().await;
        let user = store.user(1).unwrap();
        assert_eq!(user.burned_calories_kcal, 450);
        // 3100 + 400 extra for a 45-minute run
        assert_eq!(user.water_goal_ml, 3500);
        drop(store);

        let text = gateway.last_text();
        assert!(text.contains("🏃 Бег 45 минут — 450 ккал сожжено."));
        assert!(text.contains("выпейте 400 мл воды"));
    }

    #[tokio::test]
    async fn test_log_workout_usage_lists_types() {
        let (handlers, gateway, _) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_log_workout(1, 1, "бег").await.unwrap();
        let text = gateway.last_text();
        assert!(text.contains("Использование: /log_workout"));
        assert!(text.contains("бег, ходьба, плавание"));
    }

    #[tokio::test]
    async fn test_log_food_local_hit_then_grams() {
        let (handlers, gateway, store) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_log_food(1, 1, "банан").await.unwrap();
        assert!(gateway.last_text().contains("Банан — 89 ккал на 100 г."));
        assert!(matches!(
            store.lock().await.state(1),
            ConversationState::AwaitingGrams { .. }
        ));

        let state = store.lock().await.state(1);
        handlers.handle_state_input(1, 1, "150", state).await.unwrap();

        let logged = store.lock().await.user(1).unwrap().logged_calories_kcal;
        assert!((logged - 133.5).abs() < 1e-9);
        assert!(gateway
            .last_text()
            .contains("Записано: 133.5 ккал (150 г Банан)."));
        assert_eq!(store.lock().await.state(1), ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_log_food_falls_back_to_api() {
        let api_food = FoodInfo {
            name: "Crunchy Granola".to_string(),
            kcal_per_100g: 471.0,
        };
        let (handlers, gateway, _) = handlers_with(None, Some(api_food));
        register_profile(&handlers, 1).await;

        handlers.cmd_log_food(1, 1, "granola").await.unwrap();
        assert!(gateway
            .last_text()
            .contains("Crunchy Granola — 471 ккал на 100 г."));
    }

    #[tokio::test]
    async fn test_log_food_unknown_product_apologizes() {
        let (handlers, gateway, store) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_log_food(1, 1, "пельмени").await.unwrap();
        assert!(gateway
            .last_text()
            .contains("Не удалось найти информацию о продукте 'пельмени'"));
        assert_eq!(store.lock().await.state(1), ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_log_food_zero_calorie_entry_is_rejected() {
        // Tea resolves locally with 0 kcal and must not start the grams dialog
        let (handlers, gateway, _) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_log_food(1, 1, "чай").await.unwrap();
        assert!(gateway.last_text().contains("Не удалось найти информацию"));
    }

    #[tokio::test]
    async fn test_check_progress_reports_balance() {
        let (handlers, gateway, store) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        {
            let mut store = store.lock().await;
            let user = store.user_mut(1).unwrap();
            user.logged_water_ml = 1000;
            user.logged_calories_kcal = 800.0;
            user.burned_calories_kcal = 300;
        }

        handlers.cmd_check_progress(1, 1).await.unwrap();
        let text = gateway.last_text();
        assert!(text.contains("Выпито: 1000 мл из 3100 мл"));
        assert!(text.contains("Потреблено: 800 ккал из 1943 ккал"));
        assert!(text.contains("Баланс: 500 ккал"));
    }

    #[tokio::test]
    async fn test_show_graph_sends_photo_with_caption() {
        let (handlers, gateway, _) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_show_graph(1, 1).await.unwrap();
        match gateway.last() {
            Sent::Photo { chat_id, caption } => {
                assert_eq!(chat_id, 1);
                assert!(caption.contains("прогресс по воде и калориям"));
            }
            other => panic!("expected photo, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recommendations_for_fresh_profile() {
        let (handlers, gateway, _) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        handlers.cmd_recommendations(1, 1).await.unwrap();
        let text = gateway.last_text();
        assert!(text.starts_with("💡 *Рекомендации для вас:*"));
        // Nothing eaten yet: plenty of calories left, water pending, no workouts
        assert!(text.contains("до нормы"));
        assert!(text.contains("Осталось выпить"));
        assert!(text.contains("Попробуйте одну из этих тренировок"));
    }

    #[tokio::test]
    async fn test_recommendations_when_goals_are_met() {
        let (handlers, gateway, store) = handlers_with(None, None);
        register_profile(&handlers, 1).await;

        {
            let mut store = store.lock().await;
            let user = store.user_mut(1).unwrap();
            user.logged_water_ml = user.water_goal_ml;
            user.logged_calories_kcal = 5000.0;
            user.burned_calories_kcal = 250;
        }

        handlers.cmd_recommendations(1, 1).await.unwrap();
        let text = gateway.last_text();
        assert!(text.contains("Вы уже достигли дневной нормы калорий!"));
        assert!(text.contains("Вы выполнили норму воды!"));
        assert!(text.contains("Вы уже сожгли 250 ккал!"));
    }
}
