//! AWS clients shared by every invocation

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_sns::Client as SnsClient;
use aws_sdk_sqs::Client as SqsClient;
use digest_storage::{bucket::S3DigestBucket, queue::SqsQueue, topic::SnsTopic};
use tracing::info;

use crate::aggregator::DigestAggregator;
use crate::config::WorkerConfig;
use crate::types::environment::Environment;

/// Service clients built once per process and never mutated afterwards
#[derive(Clone)]
pub struct AwsClients {
    pub sqs: Arc<SqsClient>,
    pub sns: Arc<SnsClient>,
    pub s3: Arc<S3Client>,
}

impl AwsClients {
    /// Loads the shared AWS configuration and builds every client from it
    pub async fn from_environment(env: &Environment) -> Self {
        let aws_config = env.aws_config().await;

        let clients = Self {
            sqs: Arc::new(SqsClient::new(&aws_config)),
            sns: Arc::new(SnsClient::new(&aws_config)),
            s3: Arc::new(S3Client::from_conf(env.s3_client_config(&aws_config))),
        };

        info!("✅ Initialized SQS, SNS and S3 clients");
        clients
    }

    /// Wires the clients into an aggregator for `config`
    #[must_use]
    pub fn aggregator(&self, config: &WorkerConfig) -> DigestAggregator {
        DigestAggregator::new(
            Arc::new(SqsQueue::new(self.sqs.clone(), config.queue.clone())),
            Arc::new(SnsTopic::new(self.sns.clone(), config.topic_arn.clone())),
            Arc::new(S3DigestBucket::new(self.s3.clone(), config.bucket_name.clone())),
            config.format,
            config.scratch_dir.clone(),
        )
    }
}
