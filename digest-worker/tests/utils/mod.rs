//! LocalStack setup for end-to-end digest tests

#![allow(dead_code)]

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_sqs::types::QueueAttributeName;
use digest_worker::clients::AwsClients;
use uuid::Uuid;

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

/// A source queue, digest topic, observer queue subscribed to that topic and bucket
pub struct TestContext {
    pub clients: AwsClients,
    pub queue_url: String,
    pub topic_arn: String,
    pub observer_queue_url: String,
    pub bucket_name: String,
}

impl TestContext {
    pub async fn new(test_name: &str) -> Self {
        let credentials = Credentials::from_keys("test", "test", None);
        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(LOCALSTACK_ENDPOINT)
            .region(Region::new(TEST_REGION))
            .credentials_provider(credentials)
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        let clients = AwsClients {
            sqs: Arc::new(aws_sdk_sqs::Client::new(&config)),
            sns: Arc::new(aws_sdk_sns::Client::new(&config)),
            s3: Arc::new(aws_sdk_s3::Client::from_conf(s3_config)),
        };

        let suffix = Uuid::new_v4();
        let queue_url = create_queue(&clients, &format!("{test_name}-source-{suffix}")).await;
        let observer_queue_url =
            create_queue(&clients, &format!("{test_name}-observer-{suffix}")).await;

        let topic_arn = clients
            .sns
            .create_topic()
            .name(format!("{test_name}-digest-{suffix}"))
            .send()
            .await
            .expect("Failed to create topic")
            .topic_arn()
            .expect("Topic ARN not returned")
            .to_string();

        let observer_arn = clients
            .sqs
            .get_queue_attributes()
            .queue_url(&observer_queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .expect("Failed to read queue attributes")
            .attributes()
            .and_then(|attrs| attrs.get(&QueueAttributeName::QueueArn))
            .expect("Queue ARN not returned")
            .clone();

        clients
            .sns
            .subscribe()
            .topic_arn(&topic_arn)
            .protocol("sqs")
            .endpoint(observer_arn)
            .attributes("RawMessageDelivery", "true")
            .send()
            .await
            .expect("Failed to subscribe observer queue");

        let bucket_name = format!("{test_name}-{suffix}");
        clients
            .s3
            .create_bucket()
            .bucket(&bucket_name)
            .send()
            .await
            .expect("Failed to create bucket");

        Self {
            clients,
            queue_url,
            topic_arn,
            observer_queue_url,
            bucket_name,
        }
    }

    /// Sends a body to the source queue
    pub async fn enqueue(&self, body: String) {
        self.clients
            .sqs
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .expect("Failed to send message");
    }

    /// Bodies delivered to the observer queue, i.e. everything published to the topic
    pub async fn observed(&self) -> Vec<String> {
        self.clients
            .sqs
            .receive_message()
            .queue_url(&self.observer_queue_url)
            .max_number_of_messages(10)
            .wait_time_seconds(2)
            .send()
            .await
            .expect("Failed to receive from observer queue")
            .messages()
            .iter()
            .filter_map(|m| m.body().map(ToString::to_string))
            .collect()
    }

    /// Messages left on the source queue
    pub async fn remaining(&self) -> usize {
        self.clients
            .sqs
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(10)
            .send()
            .await
            .expect("Failed to receive from source queue")
            .messages()
            .len()
    }
}

async fn create_queue(clients: &AwsClients, name: &str) -> String {
    clients
        .sqs
        .create_queue()
        .queue_name(name)
        .send()
        .await
        .expect("Failed to create queue")
        .queue_url()
        .expect("Queue URL not returned")
        .to_string()
}
