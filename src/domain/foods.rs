use crate::domain::model::FoodInfo;

/// 本地食品表：常見食品的每 100 克熱量，查不到才去外部 API
struct FoodRecord {
    key: &'static str,
    name: &'static str,
    kcal: f64,
}

impl From<&FoodRecord> for FoodInfo {
    fn from(record: &FoodRecord) -> Self {
        FoodInfo {
            name: record.name.to_string(),
            kcal_per_100g: record.kcal,
        }
    }
}

#[rustfmt::skip]
const LOCAL_FOOD_TABLE: &[FoodRecord] = &[
    // Фрукты
    FoodRecord { key: "банан", name: "Банан", kcal: 89.0 },
    FoodRecord { key: "яблоко", name: "Яблоко", kcal: 52.0 },
    FoodRecord { key: "апельсин", name: "Апельсин", kcal: 47.0 },
    FoodRecord { key: "груша", name: "Груша", kcal: 57.0 },
    FoodRecord { key: "виноград", name: "Виноград", kcal: 67.0 },
    FoodRecord { key: "клубника", name: "Клубника", kcal: 33.0 },
    FoodRecord { key: "арбуз", name: "Арбуз", kcal: 30.0 },
    FoodRecord { key: "дыня", name: "Дыня", kcal: 34.0 },
    FoodRecord { key: "персик", name: "Персик", kcal: 39.0 },
    FoodRecord { key: "манго", name: "Манго", kcal: 60.0 },
    FoodRecord { key: "киви", name: "Киви", kcal: 61.0 },
    FoodRecord { key: "ананас", name: "Ананас", kcal: 50.0 },
    FoodRecord { key: "авокадо", name: "Авокадо", kcal: 160.0 },

    // Овощи
    FoodRecord { key: "огурец", name: "Огурец", kcal: 15.0 },
    FoodRecord { key: "помидор", name: "Помидор", kcal: 18.0 },
    FoodRecord { key: "морковь", name: "Морковь", kcal: 41.0 },
    FoodRecord { key: "капуста", name: "Капуста белокочанная", kcal: 25.0 },
    FoodRecord { key: "брокколи", name: "Брокколи", kcal: 34.0 },
    FoodRecord { key: "картофель", name: "Картофель", kcal: 77.0 },
    FoodRecord { key: "лук", name: "Лук репчатый", kcal: 40.0 },
    FoodRecord { key: "перец", name: "Перец болгарский", kcal: 27.0 },
    FoodRecord { key: "баклажан", name: "Баклажан", kcal: 25.0 },
    FoodRecord { key: "кабачок", name: "Кабачок", kcal: 17.0 },
    FoodRecord { key: "свекла", name: "Свёкла", kcal: 43.0 },
    FoodRecord { key: "шпинат", name: "Шпинат", kcal: 23.0 },
    FoodRecord { key: "салат", name: "Салат листовой", kcal: 14.0 },

    // Молочные продукты
    FoodRecord { key: "молоко", name: "Молоко 2.5%", kcal: 52.0 },
    FoodRecord { key: "кефир", name: "Кефир 2.5%", kcal: 50.0 },
    FoodRecord { key: "творог", name: "Творог 5%", kcal: 121.0 },
    FoodRecord { key: "сыр", name: "Сыр твёрдый", kcal: 350.0 },
    FoodRecord { key: "йогурт", name: "Йогурт натуральный", kcal: 60.0 },
    FoodRecord { key: "сметана", name: "Сметана 15%", kcal: 158.0 },
    FoodRecord { key: "масло", name: "Масло сливочное", kcal: 748.0 },

    // Мясо и рыба
    FoodRecord { key: "курица", name: "Куриная грудка", kcal: 113.0 },
    FoodRecord { key: "говядина", name: "Говядина", kcal: 187.0 },
    FoodRecord { key: "свинина", name: "Свинина", kcal: 259.0 },
    FoodRecord { key: "индейка", name: "Индейка", kcal: 104.0 },
    FoodRecord { key: "рыба", name: "Рыба (средняя)", kcal: 120.0 },
    FoodRecord { key: "лосось", name: "Лосось", kcal: 208.0 },
    FoodRecord { key: "тунец", name: "Тунец", kcal: 130.0 },
    FoodRecord { key: "креветки", name: "Креветки", kcal: 95.0 },

    // Крупы и злаки
    FoodRecord { key: "рис", name: "Рис варёный", kcal: 130.0 },
    FoodRecord { key: "гречка", name: "Гречка варёная", kcal: 110.0 },
    FoodRecord { key: "овсянка", name: "Овсянка варёная", kcal: 88.0 },
    FoodRecord { key: "макароны", name: "Макароны варёные", kcal: 131.0 },
    FoodRecord { key: "хлеб", name: "Хлеб белый", kcal: 265.0 },
    FoodRecord { key: "хлеб черный", name: "Хлеб чёрный", kcal: 201.0 },

    // Яйца
    FoodRecord { key: "яйцо", name: "Яйцо куриное", kcal: 155.0 },
    FoodRecord { key: "яичница", name: "Яичница", kcal: 196.0 },
    FoodRecord { key: "омлет", name: "Омлет", kcal: 154.0 },

    // Напитки
    FoodRecord { key: "кофе", name: "Кофе без сахара", kcal: 2.0 },
    FoodRecord { key: "чай", name: "Чай без сахара", kcal: 0.0 },
    FoodRecord { key: "сок", name: "Сок апельсиновый", kcal: 45.0 },
    FoodRecord { key: "кола", name: "Кола", kcal: 42.0 },
    FoodRecord { key: "капучино", name: "Капучино", kcal: 45.0 },
    FoodRecord { key: "латте", name: "Латте", kcal: 56.0 },
    FoodRecord { key: "раф", name: "Раф кофе", kcal: 85.0 },
    FoodRecord { key: "лавандовый раф", name: "Лавандовый раф", kcal: 95.0 },

    // Сладости и выпечка
    FoodRecord { key: "шоколад", name: "Шоколад молочный", kcal: 535.0 },
    FoodRecord { key: "печенье", name: "Печенье", kcal: 417.0 },
    FoodRecord { key: "торт", name: "Торт (средний)", kcal: 350.0 },
    FoodRecord { key: "мороженое", name: "Мороженое", kcal: 207.0 },
    FoodRecord { key: "конфеты", name: "Конфеты шоколадные", kcal: 490.0 },
    FoodRecord { key: "пирожное", name: "Пирожное", kcal: 320.0 },
    FoodRecord { key: "штрудель", name: "Штрудель яблочный", kcal: 227.0 },

    // Фастфуд
    FoodRecord { key: "пицца", name: "Пицца", kcal: 266.0 },
    FoodRecord { key: "бургер", name: "Бургер", kcal: 295.0 },
    FoodRecord { key: "картошка фри", name: "Картофель фри", kcal: 312.0 },
    FoodRecord { key: "наггетсы", name: "Куриные наггетсы", kcal: 296.0 },
    FoodRecord { key: "шаурма", name: "Шаурма", kcal: 210.0 },
    FoodRecord { key: "хот-дог", name: "Хот-дог", kcal: 290.0 },

    // Орехи и семена
    FoodRecord { key: "орехи", name: "Орехи (смесь)", kcal: 607.0 },
    FoodRecord { key: "арахис", name: "Арахис", kcal: 567.0 },
    FoodRecord { key: "миндаль", name: "Миндаль", kcal: 576.0 },
    FoodRecord { key: "грецкий орех", name: "Грецкий орех", kcal: 654.0 },
    FoodRecord { key: "семечки", name: "Семечки подсолнуха", kcal: 578.0 },

    // Каши и завтраки
    FoodRecord { key: "каша", name: "Каша на молоке", kcal: 102.0 },
    FoodRecord { key: "молочная каша", name: "Каша молочная", kcal: 102.0 },
    FoodRecord { key: "мюсли", name: "Мюсли", kcal: 352.0 },
    FoodRecord { key: "хлопья", name: "Кукурузные хлопья", kcal: 357.0 },

    // Супы
    FoodRecord { key: "борщ", name: "Борщ", kcal: 49.0 },
    FoodRecord { key: "щи", name: "Щи", kcal: 31.0 },
    FoodRecord { key: "суп", name: "Суп куриный", kcal: 36.0 },
    FoodRecord { key: "солянка", name: "Солянка", kcal: 69.0 },
];

#[derive(Debug, Clone)]
pub struct LowCalorieFood {
    pub name: &'static str,
    pub kcal_per_100g: u32,
    pub benefit: &'static str,
}

#[rustfmt::skip]
pub const LOW_CALORIE_FOODS: &[LowCalorieFood] = &[
    LowCalorieFood { name: "Огурец", kcal_per_100g: 15, benefit: "Отлично утоляет жажду" },
    LowCalorieFood { name: "Салат листовой", kcal_per_100g: 14, benefit: "Богат клетчаткой" },
    LowCalorieFood { name: "Кабачок", kcal_per_100g: 17, benefit: "Лёгкий гарнир" },
    LowCalorieFood { name: "Помидор", kcal_per_100g: 18, benefit: "Источник ликопина" },
    LowCalorieFood { name: "Шпинат", kcal_per_100g: 23, benefit: "Богат железом" },
    LowCalorieFood { name: "Брокколи", kcal_per_100g: 34, benefit: "Много витаминов" },
    LowCalorieFood { name: "Клубника", kcal_per_100g: 33, benefit: "Вкусный десерт" },
    LowCalorieFood { name: "Арбуз", kcal_per_100g: 30, benefit: "Утоляет жажду" },
    LowCalorieFood { name: "Куриная грудка", kcal_per_100g: 113, benefit: "Белок без жира" },
    LowCalorieFood { name: "Творог 5%", kcal_per_100g: 121, benefit: "Белок + кальций" },
];

const FUZZY_THRESHOLD: f64 = 0.6;

/// 本地查詢：完全相符 → 子串包含 → 模糊比對（相似度 > 0.6）
pub fn find_in_local_db(query: &str) -> Option<FoodInfo> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(record) = LOCAL_FOOD_TABLE.iter().find(|r| r.key == normalized) {
        return Some(record.into());
    }

    let mut best_match: Option<&FoodRecord> = None;
    let mut best_score = 0.0;

    for record in LOCAL_FOOD_TABLE {
        let score = strsim::sorensen_dice(&normalized, record.key);
        if score > best_score {
            best_score = score;
            best_match = Some(record);
        }

        if normalized.contains(record.key) || record.key.contains(normalized.as_str()) {
            return Some(record.into());
        }
    }

    if best_score > FUZZY_THRESHOLD {
        return best_match.map(Into::into);
    }

    None
}
