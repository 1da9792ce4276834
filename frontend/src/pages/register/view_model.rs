use super::utils::{build_register_request, REGISTRATION_SUCCESS_MESSAGE};
use crate::{
    api::{ApiClient, ApiError},
    pages::login::repository::AuthRepository,
    router::SENSORS_PATH,
    state::session::{use_session, Session, SessionStore},
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

#[derive(Clone)]
pub struct RegisterViewModel {
    pub form: RegisterFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub success: RwSignal<Option<String>>,
    pub pending: RwSignal<bool>,
    pub redirect: RwSignal<Option<&'static str>>,
    repo: AuthRepository,
    session: SessionStore,
}

impl RegisterViewModel {
    pub fn new(repo: AuthRepository, session: SessionStore) -> Self {
        Self {
            form: RegisterFormState::default(),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
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
        self.error.set(None);
        self.success.set(None);
        let request = match build_register_request(
            &self.form.username.get_untracked(),
            &self.form.email.get_untracked(),
            &self.form.password.get_untracked(),
        ) {
            Ok(request) => request,
            Err(err) => {
                self.error.set(Some(err));
                return;
            }
        };

        self.pending.set(true);
        match self.repo.register(&request).await {
            Ok(response) => {
                log::info!("registered {}", response.user.username);
                self.session.set(Session::from_auth_response(response));
                self.success.set(Some(REGISTRATION_SUCCESS_MESSAGE.to_string()));
                self.redirect.set(Some(SENSORS_PATH));
            }
            Err(err) => {
                log::warn!("registration failed: {}", err);
                self.error.set(Some(err));
            }
        }
        self.pending.set(false);
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = AuthRepository::new_with_client(Rc::new(api));
    RegisterViewModel::new(repo, use_session())
}
