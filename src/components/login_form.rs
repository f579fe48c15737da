//! Login Form Component
//!
//! Shown by the route guard whenever there is no session.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, LoginArgs};
use crate::context::use_app_context;
use crate::session::Session;

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let user = username.get().trim().to_string();
        let pass = password.get();
        if user.is_empty() || pass.is_empty() {
            set_error.set(Some("Introduce usuario y contraseña".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::login(&LoginArgs { username: &user, password: &pass }).await {
                Ok(response) => {
                    log::info!("[AUTH] Signed in as {}", response.user.username);
                    ctx.sign_in(Session { token: response.token, user: response.user });
                }
                Err(e) => {
                    log::warn!("[AUTH] Login failed: {}", e);
                    set_error.set(Some(e.user_message()));
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"Acceso"</h1>
                <label>
                    "Usuario"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Contraseña"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Entrando..." } else { "Entrar" }}
                </button>
            </form>
        </div>
    }
}
