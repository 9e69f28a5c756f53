//! 推荐服务线上类型与请求上下文编码
//!
//! 请求体固定为 `{"top_k", "followup_n", "context", "exclude_ids"}`；context 中布尔语义字段
//! 以字面量 "yes"/"no" 编码，枚举字段用固定小写串（见各 as_str）。
//! 响应中 top1_recommendation 缺失不算错误；follow_up_questions 缺失视为空；prob 缺失取 0.0。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 预测请求体（派生数据，不持久化）
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub top_k: u32,
    pub followup_n: u32,
    pub context: Map<String, Value>,
    pub exclude_ids: Vec<String>,
}

/// 服务端返回的 top1 推荐
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Top1Recommendation {
    pub activity_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub weekly_plan: Option<String>,
    #[serde(default)]
    pub prob: f64,
}

/// 预测响应：可选 top1 与后续追问列表
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub top1_recommendation: Option<Top1Recommendation>,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

/// 独立程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndependenceLevel {
    Low,
    Medium,
    High,
}

impl IndependenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            IndependenceLevel::Low => "low",
            IndependenceLevel::Medium => "medium",
            IndependenceLevel::High => "high",
        }
    }
}

/// 难度体感
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyFeel {
    TooEasy,
    Ok,
    TooHard,
}

impl DifficultyFeel {
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyFeel::TooEasy => "too_easy",
            DifficultyFeel::Ok => "ok",
            DifficultyFeel::TooHard => "too_hard",
        }
    }
}

/// 时长匹配度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFit {
    Ok,
    TooShort,
    TooLong,
    Mismatch,
}

impl TimeFit {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeFit::Ok => "ok",
            TimeFit::TooShort => "too_short",
            TimeFit::TooLong => "too_long",
            TimeFit::Mismatch => "mismatch",
        }
    }
}

/// 最大辅助（prompt）等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLevel {
    Low,
    Medium,
    High,
}

impl PromptLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            PromptLevel::Low => "low",
            PromptLevel::Medium => "medium",
            PromptLevel::High => "high",
        }
    }
}

/// 单次「完成」交互的自评表单；只活到对应请求发出为止，不持久化
#[derive(Debug, Clone, PartialEq)]
pub struct FormAnswers {
    pub session_completed: bool,
    /// 投入度评分，1.0–5.0，一位小数
    pub engagement_rating: f64,
    pub independence_level: IndependenceLevel,
    pub difficulty_feel: DifficultyFeel,
    pub behavior_issue: bool,
    /// 孩子偏好的自由文本，可为空
    pub child_preference: String,
    pub time_fit: TimeFit,
    pub prompts_used_max: PromptLevel,
    pub generalization_seen: bool,
}

impl Default for FormAnswers {
    fn default() -> Self {
        Self {
            session_completed: true,
            engagement_rating: 3.0,
            independence_level: IndependenceLevel::Medium,
            difficulty_feel: DifficultyFeel::Ok,
            behavior_issue: false,
            child_preference: String::new(),
            time_fit: TimeFit::Ok,
            prompts_used_max: PromptLevel::Medium,
            generalization_seen: false,
        }
    }
}

fn yes_no(v: bool) -> Value {
    Value::from(if v { "yes" } else { "no" })
}

impl FormAnswers {
    /// 编码为请求 context：表单字段 1:1 映射，外加当前活动 id
    pub fn to_context(&self, activity_id: &str) -> Map<String, Value> {
        let mut ctx = Map::new();
        ctx.insert("activity_id".to_string(), Value::from(activity_id));
        ctx.insert("session_completed".to_string(), yes_no(self.session_completed));
        ctx.insert(
            "engagement_rating".to_string(),
            Value::from(self.engagement_rating),
        );
        ctx.insert(
            "independence_level".to_string(),
            Value::from(self.independence_level.as_str()),
        );
        ctx.insert(
            "difficulty_feel".to_string(),
            Value::from(self.difficulty_feel.as_str()),
        );
        ctx.insert("behavior_issue".to_string(), yes_no(self.behavior_issue));
        ctx.insert(
            "child_preference".to_string(),
            Value::from(self.child_preference.as_str()),
        );
        ctx.insert("time_fit".to_string(), Value::from(self.time_fit.as_str()));
        ctx.insert(
            "prompts_used_max".to_string(),
            Value::from(self.prompts_used_max.as_str()),
        );
        ctx.insert(
            "generalization_seen".to_string(),
            yes_no(self.generalization_seen),
        );
        ctx
    }
}
