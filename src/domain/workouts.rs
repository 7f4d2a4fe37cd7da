/// 未知訓練類型的預設消耗
const DEFAULT_KCAL_PER_MIN: u32 = 5;
const DEFAULT_EMOJI: &str = "🏋️";

#[rustfmt::skip]
const WORKOUT_TABLE: &[(&str, u32, &str)] = &[
    ("бег", 10, "🏃"),
    ("ходьба", 5, "🚶"),
    ("плавание", 8, "🏊"),
    ("велосипед", 7, "🚴"),
    ("силовая", 6, "🏋️"),
    ("йога", 3, "🧘"),
    ("кардио", 8, "💪"),
];

pub fn known_workout_types() -> Vec<&'static str> {
    WORKOUT_TABLE.iter().map(|(kind, _, _)| *kind).collect()
}

pub fn kcal_per_minute(kind: &str) -> u32 {
    WORKOUT_TABLE
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|(_, kcal, _)| *kcal)
        .unwrap_or(DEFAULT_KCAL_PER_MIN)
}

pub fn workout_emoji(kind: &str) -> &'static str {
    WORKOUT_TABLE
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|(_, _, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

pub fn burned_calories(kind: &str, minutes: u32) -> u32 {
    kcal_per_minute(kind) * minutes
}

/// 訓練後補水：每開始一個 30 分鐘區塊加 200 毫升
pub fn extra_water_ml(minutes: u32) -> u32 {
    let mut extra = (minutes / 30) * 200;
    if minutes % 30 > 0 {
        extra += 200;
    }
    extra
}

#[derive(Debug, Clone)]
pub struct WorkoutRecommendation {
    pub kind: &'static str,
    pub duration_min: u32,
    pub calories: u32,
    pub description: &'static str,
}

#[rustfmt::skip]
pub const WORKOUT_RECOMMENDATIONS: &[WorkoutRecommendation] = &[
    WorkoutRecommendation { kind: "ходьба", duration_min: 30, calories: 150, description: "Лёгкая активность для начинающих" },
    WorkoutRecommendation { kind: "бег", duration_min: 20, calories: 200, description: "Эффективное кардио" },
    WorkoutRecommendation { kind: "плавание", duration_min: 30, calories: 240, description: "Нагрузка на все группы мышц" },
    WorkoutRecommendation { kind: "велосипед", duration_min: 30, calories: 210, description: "Тренировка ног и кардио" },
    WorkoutRecommendation { kind: "йога", duration_min: 45, calories: 135, description: "Гибкость и расслабление" },
    WorkoutRecommendation { kind: "силовая", duration_min: 40, calories: 240, description: "Наращивание мышц" },
];
