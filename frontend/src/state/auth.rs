use leptos::*;
use std::{future::Future, pin::Pin, rc::Rc};

use crate::api::{ApiClient, ApiError, AppUser};

use super::events::{AuthChange, AuthEvents, SessionSnapshot};

/// A gated action captured behind the login prompt, resumed once the
/// visitor authenticates.
pub type PendingAction = Rc<dyn Fn() -> Pin<Box<dyn Future<Output = ()>>>>;

/// Boxes an async closure into the pending-action shape.
pub fn pending_action<F, Fut>(f: F) -> PendingAction
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    Rc::new(move || Box::pin(f()))
}

/// UI-facing auth state machine: `loading` → anonymous or
/// authenticated, plus the login prompt and its pending action. One
/// facade per page load, handed down through context.
#[derive(Clone)]
pub struct AuthFacade {
    api: ApiClient,
    events: AuthEvents,
    user: ReadSignal<Option<AppUser>>,
    set_user: WriteSignal<Option<AppUser>>,
    loading: ReadSignal<bool>,
    set_loading: WriteSignal<bool>,
    login_modal: ReadSignal<bool>,
    set_login_modal: WriteSignal<bool>,
    pending_action: RwSignal<Option<PendingAction>>,
}

impl AuthFacade {
    pub fn new(api: ApiClient, events: AuthEvents) -> Self {
        let (user, set_user) = create_signal(None);
        let (loading, set_loading) = create_signal(true);
        let (login_modal, set_login_modal) = create_signal(false);
        Self {
            api,
            events,
            user,
            set_user,
            loading,
            set_loading,
            login_modal,
            set_login_modal,
            pending_action: create_rw_signal(None),
        }
    }

    pub fn user(&self) -> ReadSignal<Option<AppUser>> {
        self.user
    }

    pub fn current_user(&self) -> Option<AppUser> {
        self.user.get_untracked()
    }

    pub fn is_loading(&self) -> ReadSignal<bool> {
        self.loading
    }

    pub fn login_modal_visible(&self) -> ReadSignal<bool> {
        self.login_modal
    }

    pub fn open_login_modal(&self) {
        self.set_login_modal.set(true);
    }

    /// Dismissing the prompt abandons whatever was queued behind it; a
    /// stale action must never fire on a later login.
    pub fn close_login_modal(&self) {
        self.set_login_modal.set(false);
        self.pending_action.set(None);
    }

    /// Stores or clears the slot. A second call replaces the first
    /// action without running it; there is never more than one queued.
    pub fn set_pending_action(&self, action: Option<PendingAction>) {
        self.pending_action.set(action);
    }

    pub fn has_pending_action(&self) -> bool {
        self.pending_action.with_untracked(|slot| slot.is_some())
    }

    /// Takes the pending action if the visitor is authenticated. The
    /// take empties the slot, so the action can fire at most once per
    /// arming; the prompt closes alongside.
    pub fn take_due_action(&self) -> Option<PendingAction> {
        if self.user.get_untracked().is_none() {
            return None;
        }
        let action = self.pending_action.try_update(|slot| slot.take()).flatten();
        if action.is_some() {
            self.set_login_modal.set(false);
        }
        action
    }

    /// Applies a store notification. Every notification clears
    /// `loading`, whether or not a session is attached.
    pub fn apply_change(&self, _change: AuthChange, session: Option<&SessionSnapshot>) {
        match session {
            Some(snapshot) => self.set_user.set(Some(snapshot.user.clone())),
            None => self.set_user.set(None),
        }
        self.set_loading.set(false);
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self.api.login(email, password).await?;
        self.events.emit(
            AuthChange::SignedIn,
            Some(SessionSnapshot {
                user: response.user,
            }),
        );
        Ok(())
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<(), ApiError> {
        let response = self.api.signup(email, password, username).await?;
        self.events.emit(
            AuthChange::SignedIn,
            Some(SessionSnapshot {
                user: response.user,
            }),
        );
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api.logout().await?;
        self.events.emit(AuthChange::SignedOut, None);
        Ok(())
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let events = AuthEvents::new();
    let facade = AuthFacade::new(api, events.clone());

    // Observe the store for this component's lifetime; the handle is
    // collected here and released at teardown.
    let subscription = {
        let facade = facade.clone();
        events.subscribe(move |change, session| facade.apply_change(change, session))
    };
    on_cleanup(move || subscription.unsubscribe());

    // One initial "who am I" probe; any failure means anonymous. The
    // result travels through the hub like every other auth change.
    {
        let facade = facade.clone();
        spawn_local(async move {
            match facade.api.current_user().await {
                Ok(user) => facade
                    .events
                    .emit(AuthChange::TokenRefreshed, Some(SessionSnapshot { user })),
                Err(_) => facade.events.emit(AuthChange::SignedOut, None),
            }
        });
    }

    // Resume the gated action as soon as a login lands while one is
    // queued.
    {
        let facade = facade.clone();
        create_effect(move |_| {
            let _ = facade.user.get();
            let armed = facade.pending_action.with(|slot| slot.is_some());
            if !armed {
                return;
            }
            if let Some(action) = facade.take_due_action() {
                spawn_local(action());
            }
        });
    }

    provide_context(facade);
    view! { <>{children()}</> }
}

/// Accessor for the facade. Calling it outside `<AuthProvider/>` is a
/// wiring bug and panics instead of handing back a dead default.
pub fn use_auth() -> AuthFacade {
    use_context::<AuthFacade>().expect("use_auth must be called inside <AuthProvider/>")
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::cell::Cell;

    fn facade() -> AuthFacade {
        AuthFacade::new(
            ApiClient::new_with_base_urls("http://localhost:1/api", "http://localhost:1/api"),
            AuthEvents::new(),
        )
    }

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            user: AppUser {
                id: "u1".into(),
                username: "ramen_lover".into(),
                avatar_url: None,
                role: "user".into(),
            },
        }
    }

    fn counting_action(counter: &Rc<Cell<usize>>) -> PendingAction {
        let counter = counter.clone();
        Rc::new(move || {
            let counter = counter.clone();
            Box::pin(async move {
                counter.set(counter.get() + 1);
            })
        })
    }

    #[test]
    fn notification_with_session_authenticates_and_clears_loading() {
        with_runtime(|| {
            let facade = facade();
            assert!(facade.is_loading().get_untracked());

            facade.apply_change(AuthChange::SignedIn, Some(&snapshot()));
            assert_eq!(
                facade.current_user().map(|u| u.username),
                Some("ramen_lover".to_string())
            );
            assert!(!facade.is_loading().get_untracked());
        });
    }

    #[test]
    fn notification_without_session_is_anonymous_and_clears_loading() {
        with_runtime(|| {
            let facade = facade();
            facade.apply_change(AuthChange::SignedIn, Some(&snapshot()));
            facade.apply_change(AuthChange::SignedOut, None);
            assert!(facade.current_user().is_none());
            assert!(!facade.is_loading().get_untracked());
        });
    }

    #[test]
    fn setting_a_pending_action_twice_keeps_only_the_second() {
        with_runtime(|| {
            let facade = facade();
            let first = Rc::new(Cell::new(0));
            let second = Rc::new(Cell::new(0));

            facade.set_pending_action(Some(counting_action(&first)));
            facade.set_pending_action(Some(counting_action(&second)));
            assert!(facade.has_pending_action());
            facade.apply_change(AuthChange::SignedIn, Some(&snapshot()));

            let action = facade.take_due_action().expect("armed action");
            block_on_ready(action());
            assert_eq!(first.get(), 0, "replaced action must never run");
            assert_eq!(second.get(), 1);
        });
    }

    #[test]
    fn due_action_fires_exactly_once_and_closes_the_prompt() {
        with_runtime(|| {
            let facade = facade();
            let fired = Rc::new(Cell::new(0));

            facade.open_login_modal();
            facade.set_pending_action(Some(counting_action(&fired)));

            // not yet authenticated: nothing is due
            assert!(facade.take_due_action().is_none());

            facade.apply_change(AuthChange::SignedIn, Some(&snapshot()));
            let action = facade.take_due_action().expect("armed action");
            block_on_ready(action());
            assert_eq!(fired.get(), 1);
            assert!(!facade.login_modal_visible().get_untracked());

            // slot is empty now; a later transition fires nothing
            facade.apply_change(AuthChange::SignedOut, None);
            facade.apply_change(AuthChange::SignedIn, Some(&snapshot()));
            assert!(facade.take_due_action().is_none());
            assert_eq!(fired.get(), 1);
        });
    }

    #[test]
    fn closing_the_prompt_abandons_the_pending_action() {
        with_runtime(|| {
            let facade = facade();
            let fired = Rc::new(Cell::new(0));

            facade.open_login_modal();
            facade.set_pending_action(Some(counting_action(&fired)));
            facade.close_login_modal();
            assert!(!facade.has_pending_action());

            facade.apply_change(AuthChange::SignedIn, Some(&snapshot()));
            assert!(facade.take_due_action().is_none());
            assert_eq!(fired.get(), 0);
        });
    }

    #[test]
    fn use_auth_outside_provider_fails_loudly() {
        let result = std::panic::catch_unwind(|| {
            with_runtime(|| {
                let _ = use_auth();
            })
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn failed_login_propagates_and_leaves_the_facade_anonymous() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(401).json_body(json!({
                    "code": "AUTHENTICATION_ERROR",
                    "message": "メールアドレスまたはパスワードが正しくありません"
                }));
            })
            .await;

        let runtime = create_runtime();
        let events = AuthEvents::new();
        let facade = AuthFacade::new(
            ApiClient::new_with_base_urls(server.url("/api"), server.url("/api")),
            events.clone(),
        );
        let watcher = facade.clone();
        let subscription =
            events.subscribe(move |change, session| watcher.apply_change(change, session));

        let err = facade.login("a@b.com", "badpass").await.unwrap_err();
        assert!(matches!(err, ApiError::Authentication(_)));
        assert!(facade.current_user().is_none(), "facade stays anonymous");

        subscription.unsubscribe();
        runtime.dispose();
    }

    #[tokio::test]
    async fn successful_login_notifies_subscribers_into_authenticated() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(200).json_body(json!({
                    "message": "ログインに成功しました",
                    "user": {"id": "u1", "username": "ramen_lover", "role": "user"}
                }));
            })
            .await;

        let runtime = create_runtime();
        let events = AuthEvents::new();
        let facade = AuthFacade::new(
            ApiClient::new_with_base_urls(server.url("/api"), server.url("/api")),
            events.clone(),
        );
        let watcher = facade.clone();
        let subscription =
            events.subscribe(move |change, session| watcher.apply_change(change, session));

        facade.login("a@b.com", "correct-horse").await.unwrap();
        assert_eq!(
            facade.current_user().map(|u| u.username),
            Some("ramen_lover".to_string())
        );
        assert!(!facade.is_loading().get_untracked());

        subscription.unsubscribe();
        runtime.dispose();
    }

    /// Drives an immediately-ready pending-action future to completion.
    fn block_on_ready(fut: Pin<Box<dyn Future<Output = ()>>>) {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn noop_raw_waker() -> RawWaker {
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            fn noop(_: *const ()) {}
            RawWaker::new(
                std::ptr::null(),
                &RawWakerVTable::new(clone, noop, noop, noop),
            )
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut fut = fut;
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(()) => {}
            Poll::Pending => panic!("pending action future did not resolve synchronously"),
        }
    }
}
