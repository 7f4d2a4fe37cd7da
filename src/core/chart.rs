use crate::domain::model::UserData;
use crate::utils::error::{BotError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;

const WIDTH: u32 = 900;
const HEIGHT: u32 = 400;

const WATER_BLUE: RGBColor = RGBColor(52, 152, 219);
const LIGHT_GREY: RGBColor = RGBColor(236, 240, 241);
const CONSUMED_RED: RGBColor = RGBColor(231, 76, 60);
const BURNED_GREEN: RGBColor = RGBColor(46, 204, 113);

/// 進度圖的數據切片；圖上只畫形狀，數字放進照片說明文字
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressChart {
    pub water_logged_ml: u32,
    pub water_goal_ml: u32,
    pub calories_logged: f64,
    pub burned_calories: u32,
    pub calorie_goal: u32,
}

impl ProgressChart {
    pub fn from_user(user: &UserData) -> Self {
        Self {
            water_logged_ml: user.logged_water_ml,
            water_goal_ml: user.water_goal_ml,
            calories_logged: user.logged_calories_kcal,
            burned_calories: user.burned_calories_kcal,
            calorie_goal: user.calorie_goal_kcal,
        }
    }

    pub fn caption(&self) -> String {
        let remaining = self.water_goal_ml.saturating_sub(self.water_logged_ml);
        format!(
            "📊 Ваш текущий прогресс по воде и калориям\n\n\
             💧 Вода: выпито {} мл из {} мл, осталось {} мл\n\
             🍽 Калории: потреблено {:.0} ккал, сожжено {} ккал, цель {} ккал",
            self.water_logged_ml,
            self.water_goal_ml,
            remaining,
            self.calories_logged,
            self.burned_calories,
            self.calorie_goal
        )
    }

    pub fn render_png(&self) -> Result<Vec<u8>> {
        let mut raw = vec![255u8; (WIDTH * HEIGHT * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut raw, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE).map_err(to_chart_error)?;

            self.draw_water_gauge(&root)?;
            self.draw_calorie_bars(&root)?;

            root.present().map_err(to_chart_error)?;
        }

        let image = image::RgbImage::from_raw(WIDTH, HEIGHT, raw).ok_or_else(|| {
            BotError::ChartError {
                message: "pixel buffer size mismatch".to_string(),
            }
        })?;
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| BotError::ChartError {
                message: e.to_string(),
            })?;
        Ok(png)
    }

    /// 左半邊：水量橫向量表
    fn draw_water_gauge<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (x0, y0, x1, y1) = (40, 150, 410, 250);

        root.draw(&Rectangle::new([(x0, y0), (x1, y1)], LIGHT_GREY.filled()))
            .map_err(to_chart_error)?;

        let ratio = if self.water_goal_ml == 0 {
            0.0
        } else {
            (f64::from(self.water_logged_ml) / f64::from(self.water_goal_ml)).min(1.0)
        };
        let fill_to = x0 + ((f64::from(x1 - x0) * ratio) as i32);
        if fill_to > x0 {
            root.draw(&Rectangle::new(
                [(x0, y0), (fill_to, y1)],
                WATER_BLUE.filled(),
            ))
            .map_err(to_chart_error)?;
        }

        root.draw(&Rectangle::new(
            [(x0, y0), (x1, y1)],
            WATER_BLUE.stroke_width(2),
        ))
        .map_err(to_chart_error)?;
        Ok(())
    }

    /// 右半邊：攝入、消耗、目標三根柱，加一條目標虛線
    fn draw_calorie_bars<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let baseline = 340;
        let plot_height = 280.0;
        let max_value = self
            .calories_logged
            .max(f64::from(self.burned_calories))
            .max(f64::from(self.calorie_goal))
            .max(1.0);

        let bars = [
            (self.calories_logged, CONSUMED_RED, 490),
            (f64::from(self.burned_calories), BURNED_GREEN, 620),
            (f64::from(self.calorie_goal), WATER_BLUE, 750),
        ];
        for (value, color, x) in bars {
            let height = ((value / max_value) * plot_height) as i32;
            if height > 0 {
                root.draw(&Rectangle::new(
                    [(x, baseline - height), (x + 90, baseline)],
                    color.filled(),
                ))
                .map_err(to_chart_error)?;
            }
        }

        // 目標虛線
        let goal_y = baseline - ((f64::from(self.calorie_goal) / max_value) * plot_height) as i32;
        let mut x = 470;
        while x < 860 {
            root.draw(&Rectangle::new(
                [(x, goal_y - 1), (x + 10, goal_y + 1)],
                WATER_BLUE.filled(),
            ))
            .map_err(to_chart_error)?;
            x += 20;
        }
        Ok(())
    }
}

fn to_chart_error<E: std::fmt::Display>(e: E) -> BotError {
    BotError::ChartError {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UserProfile;

    fn sample_chart() -> ProgressChart {
        ProgressChart {
            water_logged_ml: 1200,
            water_goal_ml: 2600,
            calories_logged: 850.0,
            burned_calories: 300,
            calorie_goal: 1943,
        }
    }

    #[test]
    fn test_from_user_copies_totals() {
        let profile = UserProfile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age_years: 30,
            activity_minutes: 60,
            city: "Сочи".to_string(),
        };
        let mut user = UserData::new(profile, 2600, 1943);
        user.logged_water_ml = 500;
        user.logged_calories_kcal = 120.5;

        let chart = ProgressChart::from_user(&user);
        assert_eq!(chart.water_logged_ml, 500);
        assert_eq!(chart.calories_logged, 120.5);
        assert_eq!(chart.calorie_goal, 1943);
    }

    #[test]
    fn test_render_produces_png() {
        let png = sample_chart().render_png().unwrap();
        // PNG magic bytes
        assert_eq!(&png[..8], &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_render_survives_overflowing_totals() {
        let mut chart = sample_chart();
        chart.water_logged_ml = 99_000;
        chart.calories_logged = 50_000.0;
        assert!(chart.render_png().is_ok());
    }

    #[test]
    fn test_render_survives_zero_goals() {
        let chart = ProgressChart {
            water_logged_ml: 0,
            water_goal_ml: 0,
            calories_logged: 0.0,
            burned_calories: 0,
            calorie_goal: 0,
        };
        assert!(chart.render_png().is_ok());
    }

    #[test]
    fn test_caption_mentions_all_totals() {
        let caption = sample_chart().caption();
        assert!(caption.contains("1200"));
        assert!(caption.contains("2600"));
        assert!(caption.contains("850"));
        assert!(caption.contains("1943"));
    }
}
