//! 週間の献立プラン（曜日 × 朝昼夕）

use crate::domain::ids::{MealId, Uid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PLAN_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// 曜日名（先頭 3 文字の略記も可、大文字小文字を区別しない）
    pub fn parse(s: &str) -> Option<Weekday> {
        let s = s.trim().to_ascii_lowercase();
        if s.len() < 3 {
            return None;
        }
        Weekday::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().to_ascii_lowercase().starts_with(&s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn parse(s: &str) -> Option<MealSlot> {
        let s = s.trim();
        MealSlot::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
    }
}

/// プランに入った食事（食事テンプレートへの参照と表示名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMeal {
    #[serde(rename = "id")]
    pub meal_id: MealId,
    pub name: String,
}

/// 1 日分
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub breakfast: Vec<PlannedMeal>,
    #[serde(default)]
    pub lunch: Vec<PlannedMeal>,
    #[serde(default)]
    pub dinner: Vec<PlannedMeal>,
}

impl DayPlan {
    pub fn slot(&self, slot: MealSlot) -> &Vec<PlannedMeal> {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<PlannedMeal> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }
}

/// 旧形式（曜日 → 配列）も読めるようにする
#[derive(Deserialize)]
#[serde(untagged)]
enum DayRaw {
    Slots(DayPlan),
    Legacy(Vec<PlannedMeal>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealPlanRaw {
    owner_id: Uid,
    #[serde(default)]
    days: BTreeMap<Weekday, DayRaw>,
}

/// 1 プリンシパルにつき 1 つの献立プラン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MealPlanRaw")]
pub struct MealPlan {
    pub owner_id: Uid,
    pub plan_version: u32,
    pub days: BTreeMap<Weekday, DayPlan>,
}

impl From<MealPlanRaw> for MealPlan {
    fn from(raw: MealPlanRaw) -> Self {
        let mut plan = MealPlan::empty(raw.owner_id);
        for (day, value) in raw.days {
            let day_plan = match value {
                DayRaw::Slots(d) => d,
                DayRaw::Legacy(meals) => DayPlan {
                    dinner: meals,
                    ..Default::default()
                },
            };
            plan.days.insert(day, day_plan);
        }
        plan
    }
}

impl MealPlan {
    /// 21 枠すべて空のプラン
    pub fn empty(owner_id: Uid) -> Self {
        Self {
            owner_id,
            plan_version: PLAN_VERSION,
            days: Weekday::ALL.iter().map(|d| (*d, DayPlan::default())).collect(),
        }
    }

    pub fn day(&self, day: Weekday) -> &DayPlan {
        // empty() で全曜日を入れているため常に存在する
        static EMPTY: DayPlan = DayPlan {
            breakfast: Vec::new(),
            lunch: Vec::new(),
            dinner: Vec::new(),
        };
        self.days.get(&day).unwrap_or(&EMPTY)
    }

    pub fn add(&mut self, day: Weekday, slot: MealSlot, meal: PlannedMeal) {
        self.days.entry(day).or_default().slot_mut(slot).push(meal);
    }

    /// 添字の食事を外す。範囲外なら None。
    pub fn remove(&mut self, day: Weekday, slot: MealSlot, index: usize) -> Option<PlannedMeal> {
        let meals = self.days.get_mut(&day)?.slot_mut(slot);
        (index < meals.len()).then(|| meals.remove(index))
    }

    /// 曜日順・朝昼夕の順にすべての食事
    pub fn planned(&self) -> impl Iterator<Item = &PlannedMeal> + '_ {
        self.days
            .values()
            .flat_map(|d| MealSlot::ALL.into_iter().flat_map(move |s| d.slot(s).iter()))
    }

    pub fn is_empty(&self) -> bool {
        self.planned().next().is_none()
    }
}
