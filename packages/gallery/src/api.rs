use async_trait::async_trait;
use common::metadata::MetadataMap;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("Invalid server URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an error body.
    #[error("{code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

/// Server calls the gallery page makes.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    /// Filenames in the edited stage.
    async fn list_edited(&self) -> Result<Vec<String>, GalleryError>;

    /// Metadata of an edited image, with tag names in `lang`.
    async fn edited_metadata(&self, name: &str, lang: &str) -> Result<MetadataMap, GalleryError>;

    /// Send an edited image back to the gallery stage.
    async fn move_back_for_editing(&self, name: &str) -> Result<(), GalleryError>;
}

#[derive(Deserialize)]
struct Listing {
    data: Vec<String>,
}

#[derive(Deserialize)]
struct Metadata {
    data: MetadataMap,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// [`GalleryApi`] over HTTP against the gallery server.
#[derive(Debug, Clone)]
pub struct HttpGalleryApi {
    client: Client,
    base_url: Url,
}

impl HttpGalleryApi {
    pub fn new(base_url: &str) -> Result<Self, GalleryError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, GalleryError> {
        let base_url =
            Url::parse(base_url).map_err(|e| GalleryError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(GalleryError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GalleryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GalleryError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn check(res: Response) -> Result<Response, GalleryError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let text = res.text().await?;
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.message),
            Err(_) => ("HTTP_ERROR".to_string(), text),
        };
        Err(GalleryError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryApi {
    #[instrument(skip_all)]
    async fn list_edited(&self) -> Result<Vec<String>, GalleryError> {
        let url = self.endpoint(&["getImageNames_edited"])?;
        let res = Self::check(self.client.get(url).send().await?).await?;
        Ok(res.json::<Listing>().await?.data)
    }

    #[instrument(skip_all, fields(image = name, lang = lang))]
    async fn edited_metadata(&self, name: &str, lang: &str) -> Result<MetadataMap, GalleryError> {
        let url = self.endpoint(&["getMetadata_edited", name, lang])?;
        let res = Self::check(self.client.get(url).send().await?).await?;
        Ok(res.json::<Metadata>().await?.data)
    }

    #[instrument(skip_all, fields(image = name))]
    async fn move_back_for_editing(&self, name: &str) -> Result<(), GalleryError> {
        let url = self.endpoint(&["moveImageBackForEditing", name])?;
        Self::check(self.client.post(url).send().await?).await?;
        Ok(())
    }
}
