//! LocalStack test setup utilities

#![allow(dead_code)]

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sns::Client as SnsClient;
use aws_sdk_sqs::Client as SqsClient;
use uuid::Uuid;

/// Test configuration for LocalStack
pub const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

/// Shared SDK config pointing at LocalStack with hardcoded credentials for CI
pub async fn localstack_config() -> aws_config::SdkConfig {
    let credentials = Credentials::from_keys("test", "test", None);

    aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await
}

/// Creates a uniquely named standard queue and returns its URL
pub async fn create_queue(sqs_client: &SqsClient, test_name: &str) -> String {
    let queue_name = format!("{}-{}", test_name, Uuid::new_v4());

    sqs_client
        .create_queue()
        .queue_name(&queue_name)
        .send()
        .await
        .expect("Failed to create test queue")
        .queue_url()
        .expect("Queue URL not returned")
        .to_string()
}

/// Test context that provides an SQS client and a fresh queue
pub struct QueueTestContext {
    pub sqs_client: Arc<SqsClient>,
    pub queue_url: String,
}

impl QueueTestContext {
    pub async fn new(test_name: &str) -> Self {
        let config = localstack_config().await;
        let sqs_client = Arc::new(SqsClient::new(&config));
        let queue_url = create_queue(&sqs_client, test_name).await;

        Self {
            sqs_client,
            queue_url,
        }
    }
}

impl Drop for QueueTestContext {
    fn drop(&mut self) {
        let client = self.sqs_client.clone();
        let queue_url = self.queue_url.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = client.delete_queue().queue_url(&queue_url).send().await;
            });
        }
    }
}

/// Test context that provides an S3 client and a fresh bucket
pub struct BucketTestContext {
    pub s3_client: Arc<S3Client>,
    pub bucket_name: String,
}

impl BucketTestContext {
    pub async fn new(test_name: &str) -> Self {
        let config = localstack_config().await;
        // Path style keeps bucket names out of the LocalStack host name
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();
        let s3_client = Arc::new(S3Client::from_conf(s3_config));

        let bucket_name = format!("{}-{}", test_name, Uuid::new_v4());
        s3_client
            .create_bucket()
            .bucket(&bucket_name)
            .send()
            .await
            .expect("Failed to create test bucket");

        Self {
            s3_client,
            bucket_name,
        }
    }
}

/// Test context with an SNS topic fanned out to an SQS queue so publishes can be observed
pub struct TopicTestContext {
    pub sns_client: Arc<SnsClient>,
    pub topic_arn: String,
    pub queue: QueueTestContext,
}

impl TopicTestContext {
    pub async fn new(test_name: &str) -> Self {
        let config = localstack_config().await;
        let sns_client = Arc::new(SnsClient::new(&config));
        let queue = QueueTestContext::new(test_name).await;

        let topic_arn = sns_client
            .create_topic()
            .name(format!("{}-{}", test_name, Uuid::new_v4()))
            .send()
            .await
            .expect("Failed to create test topic")
            .topic_arn()
            .expect("Topic ARN not returned")
            .to_string();

        let queue_arn = queue
            .sqs_client
            .get_queue_attributes()
            .queue_url(&queue.queue_url)
            .attribute_names(aws_sdk_sqs::types::QueueAttributeName::QueueArn)
            .send()
            .await
            .expect("Failed to read queue attributes")
            .attributes()
            .and_then(|attrs| attrs.get(&aws_sdk_sqs::types::QueueAttributeName::QueueArn))
            .expect("Queue ARN not returned")
            .clone();

        sns_client
            .subscribe()
            .topic_arn(&topic_arn)
            .protocol("sqs")
            .endpoint(queue_arn)
            .send()
            .await
            .expect("Failed to subscribe queue to topic");

        Self {
            sns_client,
            topic_arn,
            queue,
        }
    }
}
