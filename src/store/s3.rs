use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::{config::Builder as S3ConfigBuilder, Client as S3Client, Error as S3Error};
use bytes::Bytes;
use tracing::debug;

use crate::config::types::S3Settings;
use crate::store::{ListPage, ObjectStore, StoreError};

/// S3 (or S3-compatible) backend. Credentials and region resolve through the
/// AWS default provider chain (environment, shared config, IMDS); the
/// settings only override region/endpoint for non-AWS stores.
pub struct S3Store {
    client: S3Client,
    bucket: String,
}

impl S3Store {
    pub async fn connect(bucket: String, settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }

        let aws_config = loader.load().await;

        let mut builder = S3ConfigBuilder::from(&aws_config);

        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if settings.force_path_style {
            builder = builder.force_path_style(true);
        }

        let client = S3Client::from_conf(builder.build());

        debug!(bucket = %bucket, "created S3 client");

        Self { client, bucket }
    }

    fn convert_error(&self, err: S3Error, key: &str) -> StoreError {
        match err {
            S3Error::NoSuchKey(_) => StoreError::NotFound {
                key: key.to_string(),
            },
            S3Error::NoSuchBucket(_) => StoreError::NotFound {
                key: format!("bucket/{}", self.bucket),
            },
            _ => {
                if err.to_string().contains("Access Denied") {
                    StoreError::AccessDenied {
                        message: err.to_string(),
                    }
                } else {
                    StoreError::Other(err.to_string())
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, StoreError> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix);

        if let Some(token) = continuation {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Other(e.to_string()))?;

        let keys = response
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|object| object.key)
            .collect::<Vec<_>>();

        debug!(prefix = %prefix, count = keys.len(), "listed page");

        Ok(ListPage {
            keys,
            next_continuation: response.next_continuation_token,
        })
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| self.convert_error(e.into(), key))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Network {
                message: e.to_string(),
            })?
            .into_bytes();

        debug!(key = %key, bytes = data.len(), "retrieved object");

        Ok(data)
    }
}
