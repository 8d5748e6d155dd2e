//! Redis pub/sub broadcaster using a bb8 connection pool.

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use futures::future::try_join_all;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use serde_json::{Map, Value, json};

use crate::broadcasting::{BroadcastError, BroadcastResult, Broadcaster, Channel};
use crate::config::settings::RedisBroadcastConfig;

type RedisPool = Pool<Client>;

/// Publishes `{"event": .., "data": ..}` to `{key_prefix}{channel}` for every
/// target channel.
pub struct RedisBroadcaster {
    pool: RedisPool,
    key_prefix: String,
}

impl RedisBroadcaster {
    pub async fn new(config: &RedisBroadcastConfig) -> BroadcastResult<Self> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| BroadcastError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(std::time::Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| BroadcastError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn prefixed_channel(&self, channel: &Channel) -> String {
        format!("{}{}", self.key_prefix, channel.broadcast_name())
    }

    async fn get_conn(&self) -> BroadcastResult<PooledConnection<'_, Client>> {
        self.pool
            .get()
            .await
            .map_err(|e| BroadcastError::Connection(e.to_string()))
    }

    async fn publish(&self, channel: &Channel, message: &str) -> BroadcastResult<()> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let target = self.prefixed_channel(channel);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        let receivers: i64 = conn_ref
            .publish(&target, message)
            .await
            .map_err(|e: RedisError| BroadcastError::Publish {
                channel: target.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(channel = %target, receivers, "published broadcast");
        Ok(())
    }
}

#[async_trait]
impl Broadcaster for RedisBroadcaster {
    async fn broadcast(
        &self,
        channels: &[Channel],
        event: &str,
        payload: &Map<String, Value>,
    ) -> BroadcastResult<()> {
        let message = serde_json::to_string(&json!({
            "event": event,
            "data": payload,
        }))?;

        try_join_all(channels.iter().map(|channel| self.publish(channel, &message))).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
