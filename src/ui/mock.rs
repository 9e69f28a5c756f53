//! 脚本化展示层（用于测试，无需终端交互）
//!
//! 表单按预置队列弹出（队列空时返回默认表单）；渲染、结果与错误全部记录供断言。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::chain::Activity;
use crate::recommend::{FormAnswers, PredictionResponse};
use crate::ui::Presentation;

/// 脚本化实现：预置表单队列 + 调用记录
#[derive(Default)]
pub struct ScriptedPresentation {
    forms: Mutex<VecDeque<Option<FormAnswers>>>,
    rendered: Mutex<Vec<Vec<Activity>>>,
    results: Mutex<Vec<PredictionResponse>>,
    errors: Mutex<Vec<String>>,
}

impl ScriptedPresentation {
    /// 预置一次表单结果（None 表示用户取消）
    pub fn push_form(&self, form: Option<FormAnswers>) {
        self.forms.lock().unwrap().push_back(form);
    }

    /// 已渲染过的链快照
    pub fn rendered(&self) -> Vec<Vec<Activity>> {
        self.rendered.lock().unwrap().clone()
    }

    /// 已展示的结果
    pub fn results(&self) -> Vec<PredictionResponse> {
        self.results.lock().unwrap().clone()
    }

    /// 已展示的错误信息
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl Presentation for ScriptedPresentation {
    async fn render_chain(&self, chain: &[Activity]) {
        self.rendered.lock().unwrap().push(chain.to_vec());
    }

    async fn collect_finish_form(&self, _activity_id: &str) -> Option<FormAnswers> {
        self.forms
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Some(FormAnswers::default()))
    }

    async fn show_result(&self, response: &PredictionResponse) {
        self.results.lock().unwrap().push(response.clone());
    }

    async fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
