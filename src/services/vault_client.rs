//! HTTP access to the three FlashVault endpoints
//!
//! [`VaultApi`] is the seam the upload controller talks through;
//! [`HttpVaultClient`] is the reqwest implementation used by the binary.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderValue, CONTENT_LENGTH};
use reqwest::{Body, Client};
use tokio::sync::mpsc::Sender;
use tokio_util::io::ReaderStream;
use url::Url;

use crate::model::error::{VaultError, VaultResult};
use crate::model::progress_tick::ProgressTick;
use crate::model::selected_file::SelectedFile;
use crate::model::server_reply::{DeleteReply, StorageCheck, StorageCheckRequest, UploadReply};
use crate::services::progress_stream::ProgressStream;

/// Size of the chunks the upload body is read from disk with
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

pub const FILENAME_HEADER: &str = "X-Filename";
pub const UPLOAD_PATH_HEADER: &str = "X-Upload-Path";

/// Characters left alone by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Operations a FlashVault server offers to the uploader
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VaultApi: Send + Sync {
    /// Asks whether `size` more bytes fit on the server
    async fn check_storage(&self, size: u64) -> VaultResult<StorageCheck>;

    /// Streams one file into `destination`, reporting body progress on `progress`.
    ///
    /// Any HTTP status is returned as a reply; only transport and local read
    /// failures are errors.
    async fn upload(
        &self,
        file: &SelectedFile,
        destination: &str,
        progress: Sender<ProgressTick>,
    ) -> VaultResult<UploadReply>;

    /// Removes the file at `path`, relative to the server's shared directory
    async fn delete(&self, path: &str) -> VaultResult<DeleteReply>;
}

/// Percent-encodes a remote path as one URI component, `/` included
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, URI_COMPONENT).to_string()
}

#[derive(Debug, Clone)]
pub struct HttpVaultClient {
    client: Client,
    base_url: Url,
}

impl HttpVaultClient {
    pub fn new(server_url: &str) -> VaultResult<Self> {
        let mut base_url = Url::parse(server_url)?;
        if base_url.cannot_be_a_base() {
            return Err(VaultError::InvalidUrl(server_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpVaultClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> VaultResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// URL the delete request for `path` is sent to.
    ///
    /// `.` and `..` would be resolved away by the URL parser and hit another
    /// endpoint, so they are refused along with the empty path.
    pub fn delete_url(&self, path: &str) -> VaultResult<Url> {
        let segment = encode_path(path);
        if matches!(segment.as_str(), "" | "." | "..") {
            return Err(VaultError::InvalidUrl(format!("cannot delete {:?}", path)));
        }
        self.endpoint(&format!("delete/{}", segment))
    }
}

fn header_value(value: &str) -> VaultResult<HeaderValue> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|e| VaultError::InvalidHeader(e.to_string()))
}

#[async_trait]
impl VaultApi for HttpVaultClient {
    async fn check_storage(&self, size: u64) -> VaultResult<StorageCheck> {
        let response = self
            .client
            .post(self.endpoint("storage-check")?)
            .json(&StorageCheckRequest { size })
            .send()
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn upload(
        &self,
        file: &SelectedFile,
        destination: &str,
        progress: Sender<ProgressTick>,
    ) -> VaultResult<UploadReply> {
        let handle = tokio::fs::File::open(&file.path).await?;
        let stream = ProgressStream::new(
            ReaderStream::with_capacity(handle, UPLOAD_CHUNK_SIZE),
            Some(file.size),
            progress,
        );

        tracing::debug!(name = %file.name, size = file.size, destination, "sending file");
        let response = self
            .client
            .post(self.endpoint("upload")?)
            .header(FILENAME_HEADER, header_value(&file.name)?)
            .header(UPLOAD_PATH_HEADER, header_value(destination)?)
            .header(CONTENT_LENGTH, file.size)
            .body(Body::wrap_stream(stream))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(UploadReply { status, body })
    }

    async fn delete(&self, path: &str) -> VaultResult<DeleteReply> {
        let response = self.client.post(self.delete_url(path)?).send().await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_matches_uri_component() {
        assert_eq!(encode_path("docs/report 1.pdf"), "docs%2Freport%201.pdf");
        assert_eq!(encode_path("a-b_c.d!~*'()"), "a-b_c.d!~*'()");
        assert_eq!(encode_path("zdjęcie#1?.jpg"), "zdj%C4%99cie%231%3F.jpg");
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(matches!(
            HttpVaultClient::new("not a url"),
            Err(VaultError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = HttpVaultClient::new("http://vault.local:8000/files").unwrap();
        assert_eq!(client.base_url().as_str(), "http://vault.local:8000/files/");
    }

    #[test]
    fn test_delete_url_refuses_dot_segments() {
        let client = HttpVaultClient::new("http://vault.local:8000").unwrap();
        for path in ["", ".", ".."] {
            assert!(
                matches!(client.delete_url(path), Err(VaultError::InvalidUrl(_))),
                "{:?} should be refused",
                path
            );
        }
        assert_eq!(
            client.delete_url("a/..").unwrap().as_str(),
            "http://vault.local:8000/delete/a%2F.."
        );
        assert_eq!(
            client.delete_url("...").unwrap().as_str(),
            "http://vault.local:8000/delete/..."
        );
    }

    #[test]
    fn test_delete_url_is_encoded() {
        let client = HttpVaultClient::new("http://vault.local:8000").unwrap();
        let url = client.delete_url("music/My Song.mp3").unwrap();
        assert_eq!(
            url.as_str(),
            "http://vault.local:8000/delete/music%2FMy%20Song.mp3"
        );
    }
}
