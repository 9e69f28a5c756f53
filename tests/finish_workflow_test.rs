//! 完成工作流集成测试

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::{mpsc, watch};

    use sprout::chain::ChainStore;
    use sprout::core::{create_engine, Command, SessionPhase, UiState};
    use sprout::recommend::{
        FormAnswers, MockRecommendService, PredictOptions, PredictionResponse, Top1Recommendation,
    };
    use sprout::storage::FileKvStore;
    use sprout::ui::ScriptedPresentation;

    async fn run_and_settle(
        cmd_tx: &mpsc::UnboundedSender<Command>,
        state_rx: &mut watch::Receiver<UiState>,
        cmd: Command,
    ) -> UiState {
        state_rx.borrow_and_update();
        cmd_tx.send(cmd).unwrap();
        loop {
            state_rx.changed().await.unwrap();
            let state = state_rx.borrow().clone();
            let in_flight = state.input_locked
                || matches!(
                    state.phase,
                    SessionPhase::AwaitingFinishInput | SessionPhase::Submitting
                );
            if !in_flight {
                return state;
            }
        }
    }

    #[tokio::test]
    async fn test_end_to_end_boot_finish_extend() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChainStore::new(Arc::new(FileKvStore::new(dir.path())));

        let service = Arc::new(MockRecommendService::new());
        service.push_result(Ok(PredictionResponse {
            top1_recommendation: Some(Top1Recommendation {
                activity_id: "ACT099".to_string(),
                name: None,
                description: None,
                detailed_description: None,
                weekly_plan: None,
                prob: 0.8,
            }),
            follow_up_questions: vec![],
        }));

        let presentation = Arc::new(ScriptedPresentation::default());
        presentation.push_form(Some(FormAnswers::default()));

        // 空存储引导：链恰好 1 个种子元素，且已落盘
        let (cmd_tx, mut state_rx) = create_engine(
            store.clone(),
            service.clone(),
            presentation.clone(),
            Box::new(StdRng::seed_from_u64(11)),
            PredictOptions::default(),
        )
        .await
        .unwrap();

        let boot = state_rx.borrow().clone();
        assert_eq!(boot.phase, SessionPhase::Bootstrapped);
        assert_eq!(boot.chain.len(), 1);
        let e0 = boot.chain[0].clone();
        assert_eq!(store.load_chain(), vec![e0.clone()]);

        // 完成 e0：链变为 [e0, ACT099]，name 回退为 id，weekly_plan 为空
        let state =
            run_and_settle(&cmd_tx, &mut state_rx, Command::Finish { tapped_id: None }).await;
        assert_eq!(state.phase, SessionPhase::Extended);
        assert_eq!(state.chain.len(), 2);
        assert_eq!(state.chain[0], e0);
        assert_eq!(state.chain[1].id, "ACT099");
        assert_eq!(state.chain[1].name, "ACT099");
        assert_eq!(state.chain[1].weekly_plan, "");
        assert_eq!(store.load_finished(), vec![e0.id.clone()]);
        assert_eq!(store.load_chain(), state.chain);

        // 请求契约：context 含全部 10 个键，排除集为 {e0.id}
        let requests = service.requests();
        assert_eq!(requests.len(), 1);
        let ctx = &requests[0].context;
        for key in [
            "activity_id",
            "session_completed",
            "engagement_rating",
            "independence_level",
            "difficulty_feel",
            "behavior_issue",
            "child_preference",
            "time_fit",
            "prompts_used_max",
            "generalization_seen",
        ] {
            assert!(ctx.contains_key(key), "missing context key {}", key);
        }
        assert_eq!(ctx["activity_id"], e0.id.as_str());
        assert_eq!(requests[0].exclude_ids, vec![e0.id.clone()]);
        assert_eq!(requests[0].opts.top_k, 5);
        assert_eq!(requests[0].opts.followup_n, 3);

        // 结果已送达展示层
        assert_eq!(presentation.results().len(), 1);
        assert!(presentation.errors().is_empty());
    }

    #[tokio::test]
    async fn test_restart_resumes_from_persisted_chain() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChainStore::new(Arc::new(FileKvStore::new(dir.path())));

        let service = Arc::new(MockRecommendService::new());
        service.push_result(Ok(PredictionResponse {
            top1_recommendation: Some(Top1Recommendation {
                activity_id: "ACT050".to_string(),
                name: Some("拼图入门".to_string()),
                description: None,
                detailed_description: None,
                weekly_plan: Some("每天 1 次".to_string()),
                prob: 0.6,
            }),
            follow_up_questions: vec![],
        }));
        let presentation = Arc::new(ScriptedPresentation::default());
        presentation.push_form(Some(FormAnswers::default()));

        let (cmd_tx, mut state_rx) = create_engine(
            store.clone(),
            service,
            presentation,
            Box::new(StdRng::seed_from_u64(5)),
            PredictOptions::default(),
        )
        .await
        .unwrap();
        let extended =
            run_and_settle(&cmd_tx, &mut state_rx, Command::Finish { tapped_id: None }).await;
        assert_eq!(extended.chain.len(), 2);
        drop(cmd_tx);

        // 模拟重启：同一存储上重建引擎，链按落盘状态原样恢复，不再播种
        let (_cmd_tx2, state_rx2) = create_engine(
            store.clone(),
            Arc::new(MockRecommendService::new()),
            Arc::new(ScriptedPresentation::default()),
            Box::new(StdRng::seed_from_u64(999)),
            PredictOptions::default(),
        )
        .await
        .unwrap();

        let resumed = state_rx2.borrow().clone();
        assert_eq!(resumed.phase, SessionPhase::Bootstrapped);
        assert_eq!(resumed.chain, extended.chain);
        assert_eq!(resumed.chain[1].name, "拼图入门");
        assert_eq!(resumed.chain[1].weekly_plan, "每天 1 次");
    }
}
