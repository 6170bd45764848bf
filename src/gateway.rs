use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

use crate::config::{Config, Mode};
use crate::generate::{self, GenerateError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: String,
}

pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerateResponse, GenerateError>> + 'a>>;

/// Seam between the interaction surface and the generation client. The
/// surface only ever sees this trait, so tests can drive it without network.
pub trait GenerateGateway {
    fn generate<'a>(&'a self, request: GenerateRequest) -> GenerateFuture<'a>;
}

type BackendFuture<'a> = Pin<Box<dyn Future<Output = Result<String, GenerateError>> + 'a>>;

trait GenerateBackend {
    fn generate<'a>(
        &'a self,
        client: &'a Client,
        cfg: &'a Config,
        prompt: &'a str,
        mode: Mode,
    ) -> BackendFuture<'a>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderBackend;

impl GenerateBackend for ProviderBackend {
    fn generate<'a>(
        &'a self,
        client: &'a Client,
        cfg: &'a Config,
        prompt: &'a str,
        mode: Mode,
    ) -> BackendFuture<'a> {
        Box::pin(async move { generate::generate(client, cfg, prompt, mode).await })
    }
}

pub struct HostGateway<'a, B = ProviderBackend> {
    client: &'a Client,
    cfg: &'a Config,
    backend: B,
}

impl<'a> HostGateway<'a, ProviderBackend> {
    pub fn new(client: &'a Client, cfg: &'a Config) -> Self {
        Self {
            client,
            cfg,
            backend: ProviderBackend,
        }
    }
}

impl<'a, B> HostGateway<'a, B> {
    pub fn with_backend(client: &'a Client, cfg: &'a Config, backend: B) -> Self {
        Self {
            client,
            cfg,
            backend,
        }
    }
}

impl<'a, B> GenerateGateway for HostGateway<'a, B>
where
    B: GenerateBackend,
{
    fn generate<'b>(&'b self, request: GenerateRequest) -> GenerateFuture<'b> {
        Box::pin(async move {
            let text = self
                .backend
                .generate(self.client, self.cfg, &request.prompt, request.mode)
                .await?;
            Ok(GenerateResponse { text })
        })
    }
}
