// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mutation dispatcher.
//!
//! Every state-changing request goes through here. Parameters are validated
//! before anything is sent; a response that is itself a session snapshot is
//! offered to the store exactly like a pushed one, so the initiator sees the
//! effect even when the push channel lags. Failures leave the store untouched.
//!
//! Nothing is predicted locally and concurrent mutations are not serialized:
//! the server orders them through its commit ids.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use desk_core::command::{
    parse_order_id, plan_desk_status, require_order, validate_shop_api, OrderModifyRequest, Otp,
    PrinterRegistration, ReaderRegistration, SearchKeywords, SetDevices,
};
use desk_core::{
    snapshot_from_value, DeskStatus, Order, OrderProductStatus, PrinterCmdType, SessionState,
    ShopApiConfig, UsbDevice,
};

use super::store::SessionStore;
use super::transport::{ApiRequest, Expect, HttpTransport, Method};
use crate::error::{Error, Result};

/// Counts blocking mutations in flight; released on drop, so failures and
/// cancelled futures release it too.
struct BusyGuard {
    busy: Arc<AtomicUsize>,
}

impl BusyGuard {
    fn new(busy: &Arc<AtomicUsize>) -> Self {
        busy.fetch_add(1, Ordering::SeqCst);
        BusyGuard { busy: Arc::clone(busy) }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Blocking {
    Yes,
    No,
}

/// How a mutation's response relates to the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Response {
    /// The response must be a snapshot.
    Snapshot,
    /// The response is applied if it parses as a snapshot and ignored otherwise.
    MaybeSnapshot,
}

#[derive(Deserialize)]
struct Connectivity {
    status: bool,
}

/// Issues state-changing requests and reconciles their responses.
pub struct MutationDispatcher<T: HttpTransport> {
    transport: Arc<T>,
    store: SessionStore,
    busy: Arc<AtomicUsize>,
}

impl<T: HttpTransport> Clone for MutationDispatcher<T> {
    fn clone(&self) -> Self {
        MutationDispatcher {
            transport: Arc::clone(&self.transport),
            store: self.store.clone(),
            busy: Arc::clone(&self.busy),
        }
    }
}

impl<T: HttpTransport> MutationDispatcher<T> {
    pub fn new(transport: Arc<T>, store: SessionStore) -> Self {
        MutationDispatcher {
            transport,
            store,
            busy: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Number of blocking mutations in flight; the presentation layer shows
    /// a wait state while this is non-zero.
    pub fn busy(&self) -> usize {
        self.busy.load(Ordering::SeqCst)
    }

    fn require_session(&self) -> Result<()> {
        self.transport.session_id().map(|_| ()).ok_or(Error::NoSession)
    }

    async fn send_json(&self, request: ApiRequest, blocking: Blocking) -> Result<Value> {
        let _busy = (blocking == Blocking::Yes).then(|| BusyGuard::new(&self.busy));
        let payload = self.transport.send(request).await?;
        Ok(payload.into_json()?)
    }

    /// Sends a blocking mutation and decodes its response as a snapshot.
    async fn exchange(&self, request: ApiRequest, response: Response) -> Result<Option<SessionState>> {
        let route = request.route.clone();
        let value = self.send_json(request, Blocking::Yes).await?;
        match snapshot_from_value(value) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) if response == Response::MaybeSnapshot => {
                tracing::debug!(%route, error = %e, "mutation response is not a snapshot");
                Ok(None)
            }
            Err(e) => Err(Error::UnexpectedResponse(format!("{route}: {e}"))),
        }
    }

    fn reconcile(&self, snapshot: SessionState) {
        let commit = snapshot.commit_id.clone();
        let verdict = self.store.offer(snapshot);
        tracing::debug!(%commit, ?verdict, "mutation response reconciled");
    }

    /// Returns the store's state after reconciling, which may be newer than
    /// the response when a push overtook it.
    async fn mutate(&self, request: ApiRequest, response: Response) -> Result<Arc<SessionState>> {
        if let Some(snapshot) = self.exchange(request, response).await? {
            self.reconcile(snapshot);
        }
        Ok(self.store.current())
    }

    async fn query<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let route = request.route.clone();
        let value = self.send_json(request, Blocking::No).await?;
        serde_json::from_value(value).map_err(|e| Error::UnexpectedResponse(format!("{route}: {e}")))
    }

    /// Creates a session, or resumes the one whose id the transport carries.
    ///
    /// Returns the server's snapshot rather than the store's, since it names
    /// the session now bound to this client.
    pub async fn resume_session(&self) -> Result<Arc<SessionState>> {
        let snapshot = self
            .exchange(ApiRequest::new(Method::Post, "session"), Response::Snapshot)
            .await?
            .map(Arc::new)
            .ok_or_else(|| Error::UnexpectedResponse("session: no snapshot".to_string()))?;
        self.reconcile(SessionState::clone(&snapshot));
        Ok(snapshot)
    }

    /// Re-reads the session without blocking the operator.
    pub async fn refresh(&self) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let value = self
            .send_json(ApiRequest::new(Method::Get, "session/my"), Blocking::No)
            .await?;
        let snapshot =
            snapshot_from_value(value).map_err(|e| Error::UnexpectedResponse(e.to_string()))?;
        self.store.offer(snapshot);
        Ok(self.store.current())
    }

    /// Changes the desk status; a request for the current status is not sent.
    pub async fn set_desk_status(&self, status: DeskStatus) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let current = self.store.current();
        let Some(status) = plan_desk_status(&current, status)? else {
            return Ok(current);
        };
        let request = ApiRequest::new(Method::Put, "session/my/desk").query("status", status.as_str());
        self.mutate(request, Response::Snapshot).await
    }

    /// Selects the order to handle.
    pub async fn set_order(&self, order_id: &str) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let id = parse_order_id(order_id)?;
        let request = ApiRequest::new(Method::Put, "session/my/order").query("order_id", id.to_string());
        self.mutate(request, Response::Snapshot).await
    }

    /// Releases the order under handling.
    pub async fn clear_order(&self) -> Result<Arc<SessionState>> {
        self.require_session()?;
        self.mutate(ApiRequest::new(Method::Put, "session/my/order"), Response::Snapshot)
            .await
    }

    /// Looks up orders by custom response; blank input returns nothing
    /// without a request.
    pub async fn search_orders(&self, input: &str) -> Result<Vec<Order>> {
        self.require_session()?;
        let keywords = SearchKeywords::parse(input);
        if keywords.is_empty() {
            return Ok(Vec::new());
        }
        let request = ApiRequest::new(Method::Get, "session/my/order")
            .query("custom_responses", keywords.to_query());
        self.query(request).await
    }

    pub async fn modify_order(&self, request: OrderModifyRequest) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let current = self.store.current();
        request.validate(require_order(&current)?)?;
        let body = serde_json::to_value(&request).map_err(desk_core::Error::from)?;
        let request = ApiRequest::new(Method::Patch, "session/my/order").body(body);
        self.mutate(request, Response::Snapshot).await
    }

    /// Marks a product of the active order as handed out.
    pub async fn mark_used(&self, product_id: &str) -> Result<Arc<SessionState>> {
        let id = uuid::Uuid::parse_str(product_id.trim())
            .map_err(|_| desk_core::Error::InvalidInput(format!("invalid product id: '{product_id}'")))?;
        self.modify_order(OrderModifyRequest::product_status(id, OrderProductStatus::Used))
            .await
    }

    /// Refunds the active order; the OTP is relayed to the shop untouched.
    pub async fn refund_order(&self, otp: &str) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let otp = Otp::parse(otp)?;
        require_order(&self.store.current())?;
        let request = ApiRequest::new(Method::Delete, "session/my/order").query("otp", otp.as_str());
        self.mutate(request, Response::Snapshot).await
    }

    /// Selects an order, prints its labels and releases it in one server call.
    pub async fn automated_order(&self, order_id: &str) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let id = parse_order_id(order_id)?;
        let request = ApiRequest::new(Method::Put, "session/my/order/automated")
            .query("order_id", id.to_string());
        self.mutate(request, Response::Snapshot).await
    }

    pub async fn register_reader(&self, cdc_path: &str) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let body = serde_json::to_value(ReaderRegistration::new(cdc_path)?)
            .map_err(desk_core::Error::from)?;
        let request = ApiRequest::new(Method::Put, "session/my/devices/reader").body(body);
        self.mutate(request, Response::Snapshot).await
    }

    pub async fn unregister_reader(&self) -> Result<Arc<SessionState>> {
        self.require_session()?;
        self.mutate(
            ApiRequest::new(Method::Delete, "session/my/devices/reader"),
            Response::Snapshot,
        )
        .await
    }

    pub async fn register_printer(
        &self,
        cdc_path: &str,
        cmd_mode: PrinterCmdType,
    ) -> Result<Arc<SessionState>> {
        self.require_session()?;
        let body = serde_json::to_value(PrinterRegistration::new(cdc_path, cmd_mode)?)
            .map_err(desk_core::Error::from)?;
        let request = ApiRequest::new(Method::Put, "session/my/devices/printer").body(body);
        self.mutate(request, Response::Snapshot).await
    }

    pub async fn unregister_printer(&self) -> Result<Arc<SessionState>> {
        self.require_session()?;
        self.mutate(
            ApiRequest::new(Method::Delete, "session/my/devices/printer"),
            Response::Snapshot,
        )
        .await
    }

    /// Renders the label for the active order and returns the image bytes.
    pub async fn preview_label(&self) -> Result<Vec<u8>> {
        self.require_session()?;
        require_order(&self.store.current())?;
        let _busy = BusyGuard::new(&self.busy);
        let request = ApiRequest::new(Method::Get, "label/preview").expect(Expect::Blob);
        Ok(self.transport.send(request).await?.into_blob()?)
    }

    pub async fn print_label(&self) -> Result<Arc<SessionState>> {
        self.require_session()?;
        require_order(&self.store.current())?;
        self.mutate(ApiRequest::new(Method::Post, "label/print"), Response::MaybeSnapshot)
            .await
    }

    pub async fn set_shop_api(&self, config: &ShopApiConfig) -> Result<Arc<SessionState>> {
        validate_shop_api(config)?;
        let body = serde_json::to_value(config).map_err(desk_core::Error::from)?;
        let request = ApiRequest::new(Method::Put, "config/domain").body(body);
        self.mutate(request, Response::MaybeSnapshot).await
    }

    /// Asks the server whether the shop API answers.
    pub async fn check_shop_api(&self) -> Result<bool> {
        let reply: Connectivity = self
            .query(ApiRequest::new(Method::Get, "config/domain/check-connectivity"))
            .await?;
        Ok(reply.status)
    }

    pub async fn set_devices(&self, devices: &SetDevices) -> Result<Arc<SessionState>> {
        let body = serde_json::to_value(devices).map_err(desk_core::Error::from)?;
        let request = ApiRequest::new(Method::Put, "config/devices").body(body);
        self.mutate(request, Response::MaybeSnapshot).await
    }

    /// Devices that can still be registered.
    pub async fn list_possible_devices(&self) -> Result<Vec<UsbDevice>> {
        self.query(ApiRequest::new(Method::Get, "config/devices/possibles"))
            .await
    }

    pub async fn clear_session(&self) -> Result<Arc<SessionState>> {
        self.require_session()?;
        self.mutate(ApiRequest::new(Method::Delete, "session"), Response::MaybeSnapshot)
            .await
    }
}
