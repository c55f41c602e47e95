use aws_sdk_lambda::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_lambda::operation::invoke::{InvokeError, InvokeOutput as LambdaInvokeOutput};
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use route_shim_core::{FunctionClient, InvocationMode, InvokeInput, InvokeOutput, PlatformFailure};

/// [`FunctionClient`] backed by the AWS Lambda `Invoke` API.
///
/// Calls block the current worker with `block_in_place`, so the client must be
/// used from a multi-threaded tokio runtime.
#[derive(Debug, Clone)]
pub struct AwsLambdaClient {
    lambda_client: aws_sdk_lambda::Client,
}

impl AwsLambdaClient {
    pub fn new(lambda_client: aws_sdk_lambda::Client) -> Self {
        Self { lambda_client }
    }

    /// Build a client from the default AWS configuration chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_lambda::Client::new(&config))
    }
}

impl FunctionClient for AwsLambdaClient {
    fn invoke(&self, input: &InvokeInput) -> Result<InvokeOutput, PlatformFailure> {
        let request = self
            .lambda_client
            .invoke()
            .function_name(input.function_name.clone())
            .invocation_type(invocation_type(input.mode))
            .set_qualifier(input.qualifier.clone())
            .set_payload(input.payload.clone().map(Blob::new));

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move { request.send().await })
        })
        .map(into_output)
        .map_err(into_platform_failure)
    }
}

fn invocation_type(mode: InvocationMode) -> InvocationType {
    match mode {
        InvocationMode::Synchronous => InvocationType::RequestResponse,
        InvocationMode::FireAndForget => InvocationType::Event,
    }
}

fn into_output(output: LambdaInvokeOutput) -> InvokeOutput {
    InvokeOutput {
        status_code: output.status_code(),
        payload: output.payload().map(|blob| blob.as_ref().to_vec()),
        function_error: output.function_error().map(str::to_string),
        executed_version: output.executed_version().map(str::to_string),
    }
}

/// Service errors that carry an error code are reported as coded failures;
/// everything else (construction, dispatch, timeout, unparseable responses)
/// is handed back untouched.
fn into_platform_failure<R>(error: SdkError<InvokeError, R>) -> PlatformFailure
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    if let Some(service_error) = error.as_service_error() {
        if let Some(code) = service_error.code() {
            return PlatformFailure::coded(code, service_error.message().unwrap_or_default());
        }
    }
    PlatformFailure::transport(error)
}

#[cfg(test)]
mod tests {
    use aws_sdk_lambda::error::ErrorMetadata;

    use super::*;

    fn coded_service_error(code: &str, message: &str) -> SdkError<InvokeError, ()> {
        SdkError::service_error(
            InvokeError::generic(ErrorMetadata::builder().code(code).message(message).build()),
            (),
        )
    }

    #[test]
    fn maps_modes_to_invocation_types() {
        assert_eq!(
            invocation_type(InvocationMode::Synchronous),
            InvocationType::RequestResponse
        );
        assert_eq!(
            invocation_type(InvocationMode::FireAndForget),
            InvocationType::Event
        );
    }

    #[test]
    fn coded_service_error_becomes_coded_failure() {
        let failure = into_platform_failure(coded_service_error(
            "TooManyRequestsException",
            "Rate exceeded",
        ));

        match failure {
            PlatformFailure::Coded { code, message } => {
                assert_eq!(code, "TooManyRequestsException");
                assert_eq!(message, "Rate exceeded");
            }
            other => panic!("expected coded failure, got {other:?}"),
        }
    }

    #[test]
    fn timeout_is_passed_through_as_transport_failure() {
        let expected = SdkError::<InvokeError, ()>::timeout_error("socket idle").to_string();
        let failure = into_platform_failure(SdkError::<InvokeError, ()>::timeout_error(
            "socket idle",
        ));

        match failure {
            PlatformFailure::Transport(error) => assert_eq!(error.to_string(), expected),
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[test]
    fn converts_sdk_output() {
        let output = LambdaInvokeOutput::builder()
            .status_code(200)
            .payload(Blob::new(br#"{"ok":true}"#.to_vec()))
            .executed_version("$LATEST")
            .build();

        let converted = into_output(output);

        assert_eq!(converted.status_code, 200);
        assert_eq!(converted.payload.as_deref(), Some(&br#"{"ok":true}"#[..]));
        assert_eq!(converted.executed_version.as_deref(), Some("$LATEST"));
        assert_eq!(converted.function_error, None);
    }
}
