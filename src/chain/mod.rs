//! 活动模型与推荐链
//!
//! Activity 是链上的一个节点；链为 append-only 的 Vec<Activity>，链尾（frontier）始终视为「当前活动」。
//! 首次启动时从固定的 3 项默认目录中均匀随机取一项作为种子（随机源可注入，便于测试）。

pub mod store;

pub use store::ChainStore;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::recommend::Top1Recommendation;

/// 推荐链上的一个活动；id 为对接推荐服务的稳定键，name 缺省时回退为 id
///
/// 落盘格式为 `{id, name, weeklyPlan}`（见 ChainStore）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(rename = "weeklyPlan", default)]
    pub weekly_plan: String,
}

impl Activity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weekly_plan: String::new(),
        }
    }

    /// 从服务端 top1 推荐构造活动：name 缺失或为空时回退为 activity_id，weekly_plan 缺失时为空
    pub fn from_recommendation(top1: &Top1Recommendation) -> Self {
        let name = top1
            .name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&top1.activity_id);
        Self {
            id: top1.activity_id.clone(),
            name: name.to_string(),
            weekly_plan: top1.weekly_plan.clone().unwrap_or_default(),
        }
    }
}

/// 固定的默认种子目录：(id, name, weekly_plan)
const DEFAULT_CATALOG: [(&str, &str, &str); 3] = [
    ("ACT001", "图卡配对", "每天 10 分钟，从 2 张图卡开始逐步加量"),
    ("ACT002", "积木叠高", "每天 1 次，目标从 3 块提升到 6 块"),
    ("ACT003", "轮流拍手游戏", "每天 2 轮，重点练习等待与轮流"),
];

/// 从默认目录中均匀随机取一项作为种子活动
pub fn seed_activity<R: Rng + ?Sized>(rng: &mut R) -> Activity {
    let (id, name, plan) = DEFAULT_CATALOG[rng.gen_range(0..DEFAULT_CATALOG.len())];
    Activity {
        id: id.to_string(),
        name: name.to_string(),
        weekly_plan: plan.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_picks_from_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let a = seed_activity(&mut rng);
            assert!(DEFAULT_CATALOG.iter().any(|(id, _, _)| *id == a.id));
            assert!(!a.id.is_empty());
        }
    }

    #[test]
    fn test_seed_is_deterministic_for_fixed_seed() {
        let a = seed_activity(&mut StdRng::seed_from_u64(42));
        let b = seed_activity(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_recommendation_name_fallback() {
        let top1 = Top1Recommendation {
            activity_id: "X".to_string(),
            name: None,
            description: None,
            detailed_description: None,
            weekly_plan: None,
            prob: 0.5,
        };
        let a = Activity::from_recommendation(&top1);
        assert_eq!(a.name, "X");
        assert_eq!(a.weekly_plan, "");

        let top1 = Top1Recommendation {
            name: Some(String::new()),
            ..top1
        };
        assert_eq!(Activity::from_recommendation(&top1).name, "X");
    }
}
