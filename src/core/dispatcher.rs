use crate::core::{ModelComparisonParams, ModelComparisonResult, ModelComparisonService, Result};
use crate::utils::validation::{CompiledRules, ReferenceRules};

/// Validates a request, hands it to the comparison service and checks that
/// the service answered with a usable reference.
pub struct ComparisonDispatcher<S: ModelComparisonService> {
    service: S,
    rules: CompiledRules,
}

impl<S: ModelComparisonService> ComparisonDispatcher<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            rules: CompiledRules::default(),
        }
    }

    /// Fails when the reference pattern does not compile.
    pub fn with_rules(service: S, rules: ReferenceRules) -> Result<Self> {
        Ok(Self {
            service,
            rules: rules.compile()?,
        })
    }

    pub fn rules(&self) -> &ReferenceRules {
        self.rules.rules()
    }

    pub async fn dispatch(&self, params: &ModelComparisonParams) -> Result<ModelComparisonResult> {
        tracing::debug!("Dispatching {}", params);

        if let Err(e) = self.rules.check_params(params) {
            tracing::warn!("Rejected model comparison request: {}", e);
            return Err(e);
        }

        tracing::info!(
            "Comparing {} model(s)",
            params.models().map(<[String]>::len).unwrap_or(0)
        );
        let result = self.service.compare(params).await?;

        if let Err(e) = self.rules.check_result(&result) {
            tracing::error!("Comparison service returned an unusable result: {}", e);
            return Err(e);
        }

        tracing::info!("Model comparison stored at {}", result.mc_ref().unwrap_or_default());
        Ok(result)
    }

    /// Decode, dispatch and re-encode in one step.
    pub async fn dispatch_json(&self, input: &str) -> Result<String> {
        let params = ModelComparisonParams::from_json_str(input)?;
        let result = self.dispatch(&params).await?;
        result.to_json_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoService;

    #[async_trait]
    impl ModelComparisonService for EchoService {
        async fn compare(&self, params: &ModelComparisonParams) -> Result<ModelComparisonResult> {
            let count = params.models().map(<[String]>::len).unwrap_or(0);
            Ok(ModelComparisonResult::new()
                .with_mc_ref("ws.1.obj.2")
                .with_extra("model_count", count))
        }
    }

    #[test]
    fn test_dispatch_json() {
        let dispatcher = ComparisonDispatcher::new(EchoService);
        let output = tokio_test::block_on(
            dispatcher.dispatch_json(r#"{"models":["ws/1/1","ws/1/2"],"pangenome_ref":"ws/2/1"}"#),
        )
        .unwrap();

        assert_eq!(output, r#"{"mc_ref":"ws.1.obj.2","model_count":2}"#);
    }

    #[test]
    fn test_dispatch_json_propagates_decode_errors() {
        let dispatcher = ComparisonDispatcher::new(EchoService);
        let err = tokio_test::block_on(dispatcher.dispatch_json(r#"{"models":"ws/1/1"}"#)).unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::ComparisonError::DecodeError { field: Some(ref f), .. } if f == "models"
        ));
    }
}
