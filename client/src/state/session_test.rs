use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use futures::channel::oneshot;
use futures::executor::block_on;
use leptos::prelude::Owner;
use uuid::Uuid;

use super::*;
use crate::net::types::Role;
use crate::state::auth::AuthPhase;
use crate::util::auth::{GuardDecision, guard_decision, should_verify_on_mount};

// =============================================================================
// FAKES
// =============================================================================

#[derive(Default)]
struct MemoryStorage {
    token: RefCell<Option<String>>,
}

impl MemoryStorage {
    fn with_token(token: &str) -> Self {
        Self { token: RefCell::new(Some(token.to_owned())) }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

type VerifyResult = Result<User, VerifyFailure>;

enum Reply {
    Now(VerifyResult),
    Later(oneshot::Receiver<VerifyResult>),
}

/// Verification endpoint with per-token scripted replies.
#[derive(Default)]
struct ScriptedApi {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    verified: RefCell<Vec<String>>,
    logged_out: RefCell<Vec<String>>,
}

impl ScriptedApi {
    fn reply(self, token: &str, result: VerifyResult) -> Self {
        self.push(token, Reply::Now(result));
        self
    }

    fn reply_later(&self, token: &str) -> oneshot::Sender<VerifyResult> {
        let (tx, rx) = oneshot::channel();
        self.push(token, Reply::Later(rx));
        tx
    }

    fn push(&self, token: &str, reply: Reply) {
        self.replies.borrow_mut().entry(token.to_owned()).or_default().push_back(reply);
    }
}

impl SessionApi for ScriptedApi {
    async fn verify(&self, token: &str) -> Result<User, VerifyFailure> {
        self.verified.borrow_mut().push(token.to_owned());
        let reply = self.replies.borrow_mut().get_mut(token).and_then(VecDeque::pop_front);
        match reply {
            Some(Reply::Now(result)) => result,
            Some(Reply::Later(rx)) => rx.await.unwrap_or_else(|_| Err(VerifyFailure::Network("dropped".to_owned()))),
            None => Err(VerifyFailure::Network("no scripted reply".to_owned())),
        }
    }

    async fn logout(&self, token: &str) {
        self.logged_out.borrow_mut().push(token.to_owned());
    }
}

type TestSession = SessionContext<MemoryStorage, ScriptedApi>;

fn session(storage: MemoryStorage, api: ScriptedApi) -> TestSession {
    Owner::new().set();
    SessionContext::new(storage, api)
}

fn user(name: &str) -> User {
    User { id: Uuid::new_v4(), email: format!("{name}@example.com"), username: name.to_owned(), role: Role::User }
}

fn phase(session: &TestSession) -> AuthPhase {
    session.state.with_untracked(AuthState::phase)
}

fn decide(session: &TestSession, require_auth: bool, origin: &str, redirect: Option<&str>) -> GuardDecision {
    session.state.with_untracked(|state| guard_decision(state, require_auth, origin, redirect))
}

/// What a guard does on mount, minus the component.
fn mount_guard(session: &TestSession, require_auth: bool) {
    if should_verify_on_mount(session.has_token(), require_auth, session.is_authenticated()) {
        block_on(session.verify_auth());
    }
}

// =============================================================================
// VERIFY_AUTH
// =============================================================================

#[test]
fn no_token_settles_without_network_call() {
    let session = session(MemoryStorage::default(), ScriptedApi::default());
    block_on(session.verify_auth());
    assert_eq!(phase(&session), AuthPhase::Unauthenticated);
    assert!(session.api.verified.borrow().is_empty());
}

#[test]
fn valid_token_authenticates() {
    let alice = user("alice");
    let api = ScriptedApi::default().reply("tok", Ok(alice.clone()));
    let session = session(MemoryStorage::with_token("tok"), api);

    block_on(session.verify_auth());
    assert_eq!(phase(&session), AuthPhase::Authenticated);
    assert_eq!(session.state.with_untracked(|s| s.user.clone()), Some(alice));
    assert_eq!(session.token().as_deref(), Some("tok"));
}

#[test]
fn loading_is_set_before_the_request_completes() {
    let api = ScriptedApi::default();
    let tx = api.reply_later("tok");
    let session = session(MemoryStorage::with_token("tok"), api);

    let pending = session.verify_auth();
    assert_eq!(phase(&session), AuthPhase::Loading);

    tx.send(Ok(user("alice"))).unwrap();
    block_on(pending);
    assert_eq!(phase(&session), AuthPhase::Authenticated);
}

#[test]
fn every_failure_kind_clears_token() {
    for failure in [VerifyFailure::Rejected(401), VerifyFailure::Network("offline".to_owned())] {
        let api = ScriptedApi::default().reply("tok", Err(failure));
        let session = session(MemoryStorage::with_token("tok"), api);
        block_on(session.verify_auth());
        assert_eq!(phase(&session), AuthPhase::Unauthenticated);
        assert_eq!(session.token(), None);
    }
}

#[test]
fn concurrent_calls_for_same_token_share_one_request() {
    let api = ScriptedApi::default();
    let tx = api.reply_later("tok");
    let session = session(MemoryStorage::with_token("tok"), api);

    let first = session.verify_auth();
    let second = session.verify_auth();
    block_on(second);
    assert_eq!(phase(&session), AuthPhase::Loading);

    tx.send(Ok(user("alice"))).unwrap();
    block_on(first);
    assert_eq!(phase(&session), AuthPhase::Authenticated);
    assert_eq!(session.api.verified.borrow().as_slice(), ["tok"]);
}

#[test]
fn stale_failure_does_not_clobber_newer_session() {
    let api = ScriptedApi::default();
    let tx_old = api.reply_later("old");
    let tx_new = api.reply_later("new");
    let session = session(MemoryStorage::with_token("old"), api);

    let first = session.verify_auth();
    session.storage.store("new");
    let second = session.verify_auth();

    let bob = user("bob");
    tx_new.send(Ok(bob.clone())).unwrap();
    tx_old.send(Err(VerifyFailure::Rejected(401))).unwrap();
    block_on(async {
        second.await;
        first.await;
    });

    assert_eq!(session.state.with_untracked(|s| s.user.clone()), Some(bob));
    assert_eq!(session.token().as_deref(), Some("new"));
}

#[test]
fn stale_success_arriving_first_is_ignored() {
    let api = ScriptedApi::default();
    let tx_old = api.reply_later("old");
    let tx_new = api.reply_later("new");
    let session = session(MemoryStorage::with_token("old"), api);

    let first = session.verify_auth();
    session.storage.store("new");
    let second = session.verify_auth();

    tx_old.send(Ok(user("mallory"))).unwrap();
    block_on(first);
    assert_eq!(phase(&session), AuthPhase::Loading);

    tx_new.send(Err(VerifyFailure::Rejected(401))).unwrap();
    block_on(second);
    assert_eq!(phase(&session), AuthPhase::Unauthenticated);
    assert_eq!(session.token(), None);
}

#[test]
fn login_during_verification_is_kept() {
    let api = ScriptedApi::default();
    let tx = api.reply_later("expired");
    let session = session(MemoryStorage::with_token("expired"), api);

    let pending = session.verify_auth();
    let carol = user("carol");
    session.login(AuthResponse { token: "fresh".to_owned(), user: carol.clone() });

    tx.send(Err(VerifyFailure::Rejected(401))).unwrap();
    block_on(pending);
    assert_eq!(session.state.with_untracked(|s| s.user.clone()), Some(carol));
    assert_eq!(session.token().as_deref(), Some("fresh"));
}

#[test]
fn logout_clears_token_and_notifies_server() {
    let session = session(MemoryStorage::default(), ScriptedApi::default());
    session.login(AuthResponse { token: "tok".to_owned(), user: user("alice") });
    assert_eq!(phase(&session), AuthPhase::Authenticated);

    block_on(session.logout());
    assert_eq!(phase(&session), AuthPhase::Unauthenticated);
    assert_eq!(session.token(), None);
    assert_eq!(session.api.logged_out.borrow().as_slice(), ["tok"]);
}

// =============================================================================
// BOOTSTRAP
// =============================================================================

#[test]
fn bootstrap_without_token_does_nothing() {
    let session = session(MemoryStorage::default(), ScriptedApi::default());
    assert!(session.bootstrap().is_none());
    assert_eq!(phase(&session), AuthPhase::Unknown);
}

#[test]
fn bootstrap_when_signed_in_does_nothing() {
    let session = session(MemoryStorage::default(), ScriptedApi::default());
    session.login(AuthResponse { token: "tok".to_owned(), user: user("alice") });
    assert!(session.bootstrap().is_none());
}

#[test]
fn bootstrap_and_guard_mount_issue_one_request() {
    let api = ScriptedApi::default();
    let tx = api.reply_later("tok");
    let session = session(MemoryStorage::with_token("tok"), api);

    let boot = session.bootstrap().expect("token present");
    assert!(should_verify_on_mount(session.has_token(), true, session.is_authenticated()));
    block_on(session.verify_auth());

    tx.send(Ok(user("alice"))).unwrap();
    block_on(boot);
    assert_eq!(session.api.verified.borrow().len(), 1);
    assert_eq!(decide(&session, true, "/orders", None), GuardDecision::Render);
}

// =============================================================================
// END-TO-END SCENARIOS
// =============================================================================

#[test]
fn no_token_on_protected_page_redirects_to_login_without_network() {
    let session = session(MemoryStorage::default(), ScriptedApi::default());
    assert!(session.bootstrap().is_none());

    mount_guard(&session, true);
    assert!(session.api.verified.borrow().is_empty());
    assert_eq!(
        decide(&session, true, "/orders", None),
        GuardDecision::RedirectToLogin("/login?redirect=%2Forders".to_owned())
    );
}

#[test]
fn expired_token_on_protected_page_is_cleared_and_redirects() {
    let api = ScriptedApi::default().reply("expired", Err(VerifyFailure::Rejected(401)));
    let session = session(MemoryStorage::with_token("expired"), api);

    let boot = session.bootstrap().expect("token present");
    assert_eq!(decide(&session, true, "/orders", None), GuardDecision::Loading);
    block_on(boot);
    mount_guard(&session, true);

    assert_eq!(session.api.verified.borrow().as_slice(), ["expired"]);
    assert_eq!(session.token(), None);
    assert_eq!(
        decide(&session, true, "/orders", None),
        GuardDecision::RedirectToLogin("/login?redirect=%2Forders".to_owned())
    );
}

#[test]
fn valid_token_on_login_page_redirects_away() {
    let api = ScriptedApi::default().reply("tok", Ok(user("alice")));
    let session = session(MemoryStorage::with_token("tok"), api);

    mount_guard(&session, false);
    assert_eq!(decide(&session, false, "/login", None), GuardDecision::RedirectAway("/".to_owned()));
    assert_eq!(
        decide(&session, false, "/login?redirect=%2Forders", Some("/orders")),
        GuardDecision::RedirectAway("/orders".to_owned())
    );
}

#[test]
fn login_page_without_token_renders_form() {
    let session = session(MemoryStorage::default(), ScriptedApi::default());
    mount_guard(&session, false);
    assert!(session.api.verified.borrow().is_empty());
    assert_eq!(decide(&session, false, "/login", None), GuardDecision::Render);
}
