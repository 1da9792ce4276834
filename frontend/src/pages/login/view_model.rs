use super::{repository::AuthRepository, utils};
use crate::{
    api::{ApiClient, ApiError},
    router::SENSORS_PATH,
    state::session::{use_session, Session, SessionStore},
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

#[derive(Clone)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub pending: RwSignal<bool>,
    /// Set once the session is established; the panel navigates there.
    pub redirect: RwSignal<Option<&'static str>>,
    repo: AuthRepository,
    session: SessionStore,
}

impl LoginViewModel {
    pub fn new(repo: AuthRepository, session: SessionStore) -> Self {
        Self {
            form: LoginFormState::default(),
            error: create_rw_signal(None),
            pending: create_rw_signal(false),
            redirect: create_rw_signal(None),
            repo,
            session,
        }
    }

    pub async fn submit(&self) {
        if self.pending.get_untracked() {
            return;
        }
        let request = match utils::build_login_request(
            &self.form.email.get_untracked(),
            &self.form.password.get_untracked(),
        ) {
            Ok(request) => request,
            Err(err) => {
                self.error.set(Some(err));
                return;
            }
        };

        self.error.set(None);
        self.pending.set(true);
        match self.repo.login(&request).await {
            Ok(response) => {
                log::info!("logged in as {}", response.user.username);
                self.session.set(Session::from_auth_response(response));
                self.redirect.set(Some(SENSORS_PATH));
            }
            Err(err) => {
                log::warn!("login failed: {}", err);
                self.error.set(Some(err));
            }
        }
        self.pending.set(false);
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = AuthRepository::new_with_client(Rc::new(api));
    LoginViewModel::new(repo, use_session())
}
