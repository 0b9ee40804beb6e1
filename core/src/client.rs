//! The request pipeline and its three call shapes.
//!
//! # Design
//! `ApiClient` holds a transport and a codec behind an `Arc` and carries no
//! per-call state, so it is cheap to clone and safe to share between tasks.
//! Every call shape is a thin adapter over the same two steps:
//!
//! 1. `request::build` turns the endpoint into a `WireRequest` synchronously.
//! 2. `Shared::round_trip` sends it and runs `validate_and_decode`.
//!
//! The shapes only differ in how the outcome reaches the caller:
//! - `fetch` is an `async fn`; dropping its future cancels the transport call.
//! - `fetch_stream` returns a cold single-item stream; dropping it cancels.
//! - `fetch_with` spawns the round trip and hands the outcome to a callback.

use std::marker::PhantomData;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Builder, Handle};
use tracing::Instrument;
use uuid::Uuid;

use crate::codec::{Codec, JsonCodec};
use crate::endpoint::Endpoint;
use crate::error::{ApiError, Outcome, TransportError};
use crate::request;
use crate::response::validate_and_decode;
use crate::transport::Transport;
use crate::wire::WireRequest;

/// Dispatches endpoints through a transport and decodes the responses.
pub struct ApiClient<T, C = JsonCodec> {
    shared: Arc<Shared<T, C>>,
    runtime: Option<Handle>,
}

struct Shared<T, C> {
    transport: T,
    codec: C,
}

impl<T, C> Clone for ApiClient<T, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T, JsonCodec> {
    /// Client with the JSON codec. Callbacks spawn on whichever tokio runtime
    /// is current when `fetch_with` is called.
    pub fn new(transport: T) -> Self {
        Self::builder(transport).build()
    }

    pub fn builder(transport: T) -> ApiClientBuilder<T, JsonCodec> {
        ApiClientBuilder {
            transport,
            codec: JsonCodec,
            runtime: None,
        }
    }
}

impl<T: Transport, C: Codec> ApiClient<T, C> {
    pub fn transport(&self) -> &T {
        &self.shared.transport
    }

    /// Send `endpoint` and wait for the decoded result.
    pub async fn fetch<D>(&self, endpoint: &(impl Endpoint + ?Sized)) -> Outcome<D>
    where
        D: DeserializeOwned,
    {
        let request = prepare(endpoint)?;
        Arc::clone(&self.shared).round_trip(request).await
    }

    /// Cold, single-item stream of the decoded result.
    ///
    /// Nothing is sent until the stream is first polled. A build failure is
    /// yielded as the only item without touching the transport.
    pub fn fetch_stream<D>(&self, endpoint: &(impl Endpoint + ?Sized)) -> BoxStream<'static, Outcome<D>>
    where
        D: DeserializeOwned + Send + 'static,
    {
        let prepared = prepare(endpoint);
        let shared = Arc::clone(&self.shared);
        stream::once(async move {
            match prepared {
                Ok(request) => shared.round_trip(request).await,
                Err(err) => Err(err),
            }
        })
        .boxed()
    }

    /// Send `endpoint` in the background and pass the outcome to `completion`.
    ///
    /// `completion` runs exactly once: synchronously on this thread when the
    /// request cannot be built, otherwise on the runtime once the transport
    /// finishes.
    pub fn fetch_with<D, F>(&self, endpoint: &(impl Endpoint + ?Sized), completion: F)
    where
        D: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<D>) + Send + 'static,
    {
        let request = match prepare(endpoint) {
            Ok(request) => request,
            Err(err) => return completion(Err(err)),
        };
        let shared = Arc::clone(&self.shared);
        let completion = Completion::new(completion);

        let runtime = self.runtime.clone().or_else(|| Handle::try_current().ok());
        if let Some(runtime) = runtime {
            runtime.spawn(async move {
                let outcome = shared.round_trip(request).await;
                completion.deliver(outcome);
            });
            return;
        }

        // No runtime to borrow: drive the call on its own thread.
        std::thread::spawn(move || {
            match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => {
                    let outcome = runtime.block_on(shared.round_trip(request));
                    completion.deliver(outcome);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to start runtime for callback call");
                    completion.deliver(Err(ApiError::Transport(TransportError::new(err))));
                }
            }
        });
    }
}

#[derive(Debug, Error)]
#[error("call was abandoned before the transport completed")]
struct Abandoned;

/// Callback slot for `fetch_with`.
///
/// If the spawned task is dropped without delivering (runtime shut down,
/// transport panicked) the callback still runs once, with a transport error.
struct Completion<D, F: FnOnce(Outcome<D>)> {
    callback: Option<F>,
    _outcome: PhantomData<fn(D)>,
}

impl<D, F: FnOnce(Outcome<D>)> Completion<D, F> {
    fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
            _outcome: PhantomData,
        }
    }

    fn deliver(mut self, outcome: Outcome<D>) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

impl<D, F: FnOnce(Outcome<D>)> Drop for Completion<D, F> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            tracing::warn!("callback call dropped before completion");
            callback(Err(ApiError::Transport(TransportError::new(Abandoned))));
        }
    }
}

impl<T: Transport, C: Codec> Shared<T, C> {
    async fn round_trip<D>(self: Arc<Self>, request: WireRequest) -> Outcome<D>
    where
        D: DeserializeOwned,
    {
        let call_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "wirecall.call",
            %call_id,
            method = %request.method(),
            url = %request.url()
        );

        async move {
            tracing::debug!("dispatching request");
            let result = self.transport.execute(request).await;
            let outcome = validate_and_decode(&self.codec, result);
            match &outcome {
                Ok(_) => tracing::debug!("call succeeded"),
                Err(err) => tracing::warn!(error = %err, "call failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

fn prepare(endpoint: &(impl Endpoint + ?Sized)) -> Result<WireRequest, ApiError> {
    request::build(endpoint).map_err(|err| {
        tracing::warn!(error = %err, "request could not be built");
        ApiError::Request(err)
    })
}

/// Configures an `ApiClient`.
pub struct ApiClientBuilder<T, C> {
    transport: T,
    codec: C,
    runtime: Option<Handle>,
}

impl<T: Transport, C: Codec> ApiClientBuilder<T, C> {
    /// Decode responses with `codec` instead of JSON.
    pub fn codec<C2: Codec>(self, codec: C2) -> ApiClientBuilder<T, C2> {
        ApiClientBuilder {
            transport: self.transport,
            codec,
            runtime: self.runtime,
        }
    }

    /// Runtime on which `fetch_with` spawns its calls, instead of the one
    /// current at call time.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> ApiClient<T, C> {
        ApiClient {
            shared: Arc::new(Shared {
                transport: self.transport,
                codec: self.codec,
            }),
            runtime: self.runtime,
        }
    }
}
