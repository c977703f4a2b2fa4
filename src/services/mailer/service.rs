use super::dto::{Email, SendEmailIn};
use crate::rabbitmq::DEFAULT_EXCHANGE;
use anyhow::Result;
use axum::async_trait;
use deadpool_lapin::Pool;
use lapin::{options::BasicPublishOptions, BasicProperties, Channel};
use tracing::info;

/// rabbitmq queue to publish RPC requests to the mailer service
static MAILER_QUEUE: &str = "mailer";

/// RPC operation to send a email
static OP_SEND_EMAIL: &str = "sendEmail";

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<()>;
}

/// Sends emails by making RPC calls to the mailer microservice
#[derive(Clone)]
pub struct RmqMailer {
    rmq_conn_pool: Pool,
    sender: String,
}

impl RmqMailer {
    pub fn new(rmq_conn_pool: Pool, sender: &str) -> RmqMailer {
        RmqMailer {
            rmq_conn_pool,
            sender: String::from(sender),
        }
    }

    // a channel is created for every publish and dropped once it is done
    //
    // see: https://github.com/bikeshedder/deadpool/issues/47
    async fn get_channel(&self) -> Result<Channel> {
        Ok(self.rmq_conn_pool.get().await?.create_channel().await?)
    }

    async fn publish_to_mailer_service(&self, payload: &[u8], rpc_name: &str) -> Result<()> {
        self.get_channel()
            .await?
            .basic_publish(
                DEFAULT_EXCHANGE,
                MAILER_QUEUE,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_kind(rpc_name.into()),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for RmqMailer {
    async fn send(&self, email: Email) -> Result<()> {
        let input = SendEmailIn::from_email(email, &self.sender);

        self.publish_to_mailer_service(serde_json::to_string(&input)?.as_bytes(), OP_SEND_EMAIL)
            .await
    }
}

/// Only logs the emails, used when no rabbitmq server is configured
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<()> {
        info!(
            "[MAILER] email to {} ({}): {}",
            email.to, email.subject, email.text
        );

        Ok(())
    }
}
