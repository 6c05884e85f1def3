use anyhow::Result;
use async_trait::async_trait;
use model_comparison::{
    ComparisonDispatcher, ComparisonError, ModelComparisonParams, ModelComparisonResult,
    ModelComparisonService, ReferenceRules, ValidationConfig,
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct MockService {
    calls: Arc<Mutex<Vec<ModelComparisonParams>>>,
    answer: Option<ModelComparisonResult>,
}

impl MockService {
    fn answering(result: ModelComparisonResult) -> Self {
        Self {
            calls: Arc::default(),
            answer: Some(result),
        }
    }

    async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl ModelComparisonService for MockService {
    async fn compare(
        &self,
        params: &ModelComparisonParams,
    ) -> model_comparison::Result<ModelComparisonResult> {
        self.calls.lock().await.push(params.clone());
        self.answer.clone().ok_or_else(|| ComparisonError::ServiceError {
            message: "comparison failed".to_string(),
        })
    }
}

#[tokio::test]
async fn test_dispatch_passes_params_through() -> Result<()> {
    let service = MockService::answering(ModelComparisonResult::new().with_mc_ref("ws.1.obj.2"));
    let dispatcher = ComparisonDispatcher::new(service.clone());

    let params = ModelComparisonParams::new()
        .with_models(["ws/1/1", "ws/1/2"])
        .with_protcomp_ref("ws/3/1")
        .with_extra("trace", "abc");
    let result = dispatcher.dispatch(&params).await?;

    assert_eq!(result.mc_ref(), Some("ws.1.obj.2"));
    let calls = service.calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], params);
    Ok(())
}

#[tokio::test]
async fn test_invalid_params_never_reach_service() -> Result<()> {
    let service = MockService::answering(ModelComparisonResult::new().with_mc_ref("ws.1.obj.2"));
    let dispatcher = ComparisonDispatcher::new(service.clone());

    let err = dispatcher
        .dispatch(&ModelComparisonParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ComparisonError::MissingFieldError { .. }));

    let err = dispatcher
        .dispatch(&ModelComparisonParams::new().with_models(["ws/1/1"]).with_pangenome_ref(""))
        .await
        .unwrap_err();
    assert!(matches!(err, ComparisonError::InvalidFieldValueError { .. }));

    assert_eq!(service.call_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_result_without_reference_is_rejected() -> Result<()> {
    let service = MockService::answering(ModelComparisonResult::new().with_extra("status", "done"));
    let dispatcher = ComparisonDispatcher::new(service.clone());

    let err = dispatcher
        .dispatch(&ModelComparisonParams::new().with_models(["ws/1/1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ComparisonError::MissingFieldError { ref field } if field == "mc_ref"));
    assert_eq!(service.call_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_service_errors_propagate() -> Result<()> {
    let service = MockService::default();
    let dispatcher = ComparisonDispatcher::with_rules(service, ReferenceRules::permissive())?;

    let err = dispatcher.dispatch_json("{}").await.unwrap_err();
    assert!(matches!(err, ComparisonError::ServiceError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_rules_loaded_from_config_file() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let config_path = temp_dir.path().join("validation.toml");
    tokio::fs::write(
        &config_path,
        r#"
[validation]
reference_pattern = '^\d+/\d+(/\d+)?$'
max_models = 2
"#,
    )
    .await?;

    let rules = ValidationConfig::from_file(&config_path)?.into_rules();
    let service = MockService::answering(ModelComparisonResult::new().with_mc_ref("12/3/1"));
    let dispatcher = ComparisonDispatcher::with_rules(service.clone(), rules)?;

    let output = dispatcher.dispatch_json(r#"{"models":["12/1","12/2/4"]}"#).await?;
    assert_eq!(output, r#"{"mc_ref":"12/3/1"}"#);

    let err = dispatcher
        .dispatch_json(r#"{"models":["12/1","12/2","12/3"]}"#)
        .await
        .unwrap_err();
    assert!(matches!(err, ComparisonError::InvalidFieldValueError { .. }));
    assert_eq!(service.call_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_broken_pattern_rejected_when_dispatcher_is_built() -> Result<()> {
    let rules = ReferenceRules {
        reference_pattern: Some("([".to_string()),
        ..ReferenceRules::default()
    };

    let err = ComparisonDispatcher::with_rules(MockService::default(), rules)
        .err()
        .expect("pattern must fail to compile");
    assert!(matches!(err, ComparisonError::ConfigValidationError { .. }));
    Ok(())
}
