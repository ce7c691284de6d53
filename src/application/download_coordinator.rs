use std::path::PathBuf;

use futures::{stream::BoxStream, StreamExt};
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::{
    api::ApiClient,
    domain::{AppError, DownloadPlan, DownloadProgress, QualityTier, VideoDescriptor},
    extract::extract_video_descriptor,
    utils::sanitize_filename,
};

#[derive(Debug, Clone)]
pub enum DownloadEvent {
    Progress(DownloadProgress),
    Completed(PathBuf),
    Failed(AppError),
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// Fetch the video page and recover the descriptor embedded in it.
    pub async fn prepare(&self, page_url: &str) -> Result<DownloadPlan, AppError> {
        let parsed = Url::parse(page_url).map_err(|_| AppError::InvalidInput)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::InvalidInput);
        }

        let html = self
            .api_client
            .fetch_page(page_url)
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        let descriptor = extract_video_descriptor(&html)?;

        let suggested_filename = format!(
            "{}.mp4",
            sanitize_filename(&descriptor.title).trim_matches(|c| c == '.' || c == ' ')
        );

        Ok(DownloadPlan {
            descriptor,
            suggested_filename,
        })
    }

    /// Resolve a direct stream URL for the descriptor at the requested tier.
    pub async fn resolve_stream(
        &self,
        descriptor: &VideoDescriptor,
        tier: QualityTier,
    ) -> Result<String, AppError> {
        self.api_client
            .resolve_stream_url(&descriptor.video_id, &descriptor.content_id, tier.code())
            .await
            .map_err(|e| AppError::Api(e.to_string()))
    }

    /// Stream the media URL into `path`, emitting one event per chunk.
    ///
    /// The file handle lives inside the stream state, so every exit path
    /// (completion, stream error, write error) drops and closes it before
    /// the final event is emitted. A partial file is left on disk on
    /// failure.
    pub fn download_stream(&self, url: String, path: PathBuf) -> BoxStream<'static, DownloadEvent> {
        futures::stream::unfold(
            DownloadRuntimeState::Start {
                client: self.api_client.clone(),
                url,
                path,
            },
            |state| async move {
                match state {
                    DownloadRuntimeState::Start { client, url, path } => {
                        let file = match tokio::fs::File::create(&path).await {
                            Ok(file) => file,
                            Err(e) => {
                                return Some((
                                    DownloadEvent::Failed(AppError::Io(format!(
                                        "Failed to create file: {}",
                                        e
                                    ))),
                                    DownloadRuntimeState::Finished,
                                ));
                            }
                        };

                        match client.download_file_stream(&url).await {
                            Ok((total_size, stream)) => Some((
                                DownloadEvent::Progress(DownloadProgress {
                                    received_bytes: 0,
                                    total_bytes: total_size,
                                }),
                                DownloadRuntimeState::Downloading {
                                    file,
                                    stream: stream.boxed(),
                                    received: 0,
                                    total: total_size,
                                    path,
                                },
                            )),
                            Err(e) => Some((
                                DownloadEvent::Failed(AppError::Api(e.to_string())),
                                DownloadRuntimeState::Finished,
                            )),
                        }
                    }
                    DownloadRuntimeState::Downloading {
                        mut file,
                        mut stream,
                        mut received,
                        total,
                        path,
                    } => match stream.next().await {
                        Some(Ok(chunk)) => {
                            // Chunks arrive in transport order; writes must
                            // preserve it.
                            if let Err(e) = file.write_all(&chunk).await {
                                return Some((
                                    DownloadEvent::Failed(AppError::Io(format!(
                                        "Write error: {}",
                                        e
                                    ))),
                                    DownloadRuntimeState::Finished,
                                ));
                            }

                            received += chunk.len() as u64;

                            Some((
                                DownloadEvent::Progress(DownloadProgress {
                                    received_bytes: received,
                                    total_bytes: total,
                                }),
                                DownloadRuntimeState::Downloading {
                                    file,
                                    stream,
                                    received,
                                    total,
                                    path,
                                },
                            ))
                        }
                        Some(Err(e)) => Some((
                            DownloadEvent::Failed(AppError::Download(e.to_string())),
                            DownloadRuntimeState::Finished,
                        )),
                        None => {
                            if let Err(e) = file.sync_all().await {
                                return Some((
                                    DownloadEvent::Failed(AppError::Io(format!(
                                        "Failed to sync file: {}",
                                        e
                                    ))),
                                    DownloadRuntimeState::Finished,
                                ));
                            }

                            Some((
                                DownloadEvent::Completed(path),
                                DownloadRuntimeState::Finished,
                            ))
                        }
                    },
                    DownloadRuntimeState::Finished => None,
                }
            },
        )
        .boxed()
    }
}

enum DownloadRuntimeState {
    Start {
        client: ApiClient,
        url: String,
        path: PathBuf,
    },
    Downloading {
        file: tokio::fs::File,
        stream: BoxStream<'static, crate::api::Result<bytes::Bytes>>,
        received: u64,
        total: Option<u64>,
        path: PathBuf,
    },
    Finished,
}
