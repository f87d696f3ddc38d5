use crate::context::AppContext;
use crate::prompt::{Input, Prompt};
use crate::render;
use anyhow::{Result, bail};
use genlearn_application::{HistoryService, SettingChange};
use genlearn_core::history::Page;
use genlearn_core::user::{ProfileUpdate, UserGateway};

pub async fn login(ctx: &AppContext, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            render::warning(
                "Input is not hidden. Pass --password or set GENLEARN_PASSWORD to avoid echoing.",
            );
            match Prompt::new(&[])?.read("password: ")? {
                Input::Line(line) => line,
                Input::Quit => bail!("Login cancelled"),
            }
        }
    };

    let user = ctx.auth()?.login(username, &password).await?;
    render::success(&format!("Welcome back, {}!", user.display_name));
    render::user(&user);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.auth()?.logout().await?;
    render::success("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.auth()?.load_user().await? {
        Some(user) => render::user(&user),
        None => render::info("Not logged in."),
    }
    Ok(())
}

pub async fn profile_show(ctx: &AppContext) -> Result<()> {
    ctx.require_user().await?;
    let profile = ctx.api.profile().await?;
    render::user(&profile);
    Ok(())
}

pub async fn profile_update(ctx: &AppContext, update: ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update. Pass --display-name or --email.");
    }
    ctx.require_user().await?;
    let profile = ctx.api.update_profile(&update).await?;
    render::success("Profile updated.");
    render::user(&profile);
    Ok(())
}

pub async fn history(ctx: &AppContext, limit: u32, offset: u32) -> Result<()> {
    let user = ctx.require_user().await?;
    let overview = HistoryService::new(ctx.api.clone())
        .overview(&user.user_id, Page { limit, offset })
        .await;
    render::history(&overview);
    Ok(())
}

pub async fn settings_show(ctx: &AppContext) -> Result<()> {
    let settings = ctx.settings()?.current().await;
    render::heading("Settings");
    render::settings(&settings);
    Ok(())
}

pub async fn settings_set(ctx: &AppContext, key: &str, value: &str) -> Result<()> {
    let change = SettingChange::parse(key, value)?;
    let settings = ctx.settings()?.apply(change).await?;
    render::success(&format!("Updated {}.", key));
    render::settings(&settings);
    Ok(())
}

pub async fn settings_reset(ctx: &AppContext) -> Result<()> {
    let settings = ctx.settings()?.reset().await?;
    render::success("Settings restored to defaults.");
    render::settings(&settings);
    Ok(())
}
