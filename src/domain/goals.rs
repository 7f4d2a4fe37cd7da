/// 每日飲水配額（毫升）：
/// 體重 * 30，每完整 30 分鐘活動加 500，高溫再加 500（>25°C）或 1000（>30°C）
pub fn water_goal_ml(weight_kg: f64, activity_minutes: u32, temperature_c: Option<f64>) -> u32 {
    let base = weight_kg * 30.0;
    let activity_bonus = (activity_minutes / 30) * 500;

    let weather_bonus = match temperature_c {
        Some(t) if t > 30.0 => 1000,
        Some(t) if t > 25.0 => 500,
        _ => 0,
    };

    (base + f64::from(activity_bonus) + f64::from(weather_bonus)) as u32
}

/// 每日熱量配額（Mifflin-St Jeor 基礎代謝 + 每分鐘活動約 5 kcal）
pub fn calorie_goal_kcal(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    activity_minutes: u32,
) -> u32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    let activity_bonus = activity_minutes * 5;
    (base + f64::from(activity_bonus)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_goal_without_weather() {
        // 70 kg, 60 min: 2100 + 1000
        assert_eq!(water_goal_ml(70.0, 60, None), 3100);
    }

    #[test]
    fn test_water_goal_partial_half_hour_is_ignored() {
        // 45 minutes only counts one full 30-minute block
        assert_eq!(water_goal_ml(70.0, 45, None), 2600);
    }

    #[test]
    fn test_water_goal_hot_weather() {
        assert_eq!(water_goal_ml(70.0, 60, Some(26.0)), 3600);
        assert_eq!(water_goal_ml(70.0, 60, Some(31.0)), 4100);
        // Exactly 25°C gets no bonus
        assert_eq!(water_goal_ml(70.0, 60, Some(25.0)), 3100);
    }

    #[test]
    fn test_calorie_goal() {
        // 700 + 1093.75 - 150 + 300 = 1943.75 → 1943
        assert_eq!(calorie_goal_kcal(70.0, 175.0, 30, 60), 1943);
    }

    #[test]
    fn test_calorie_goal_sedentary() {
        assert_eq!(calorie_goal_kcal(60.0, 165.0, 25, 0), 1506);
    }
}
