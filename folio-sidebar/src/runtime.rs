use std::collections::VecDeque;

use crate::menu::{BlockDraft, CreatedPage, MenuItemId};
use crate::services::{MenuService, ServiceError};
use crate::settings::SidebarSettings;
use crate::widgets::sidebar::{
    Notification, NotificationLevel, SidebarCtx, SidebarEffect, SidebarEvent,
    SidebarIntent, SidebarView, SidebarWidget,
};

/// Event loop driving the sidebar against a menu service.
///
/// Intents are reduced in arrival order. Effects run after the intent that
/// produced them and feed their results back as new intents.
pub struct SidebarRuntime<S> {
    widget: SidebarWidget,
    service: S,
    settings: SidebarSettings,
    view: SidebarView,
    queue: VecDeque<SidebarEvent>,
    notifications: Vec<Notification>,
    history: Vec<String>,
}

impl<S: MenuService> SidebarRuntime<S> {
    pub fn new(
        settings: SidebarSettings,
        service: S,
        view: SidebarView,
    ) -> Self {
        Self {
            widget: SidebarWidget::from_settings(&settings),
            service,
            settings,
            view,
            queue: VecDeque::new(),
            notifications: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Queue an intent without processing it.
    pub fn dispatch(&mut self, intent: SidebarIntent) {
        self.queue.push_back(SidebarEvent::Intent(intent));
    }

    /// Queue an intent and process events until the queue drains.
    pub async fn handle(&mut self, intent: SidebarIntent) {
        self.dispatch(intent);
        self.run_until_idle().await;
    }

    pub async fn run_until_idle(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            match event {
                SidebarEvent::Intent(intent) => self.route_intent(intent),
                SidebarEvent::Effect(effect) => self.route_effect(effect).await,
            }
        }
    }

    pub fn widget(&self) -> &SidebarWidget {
        &self.widget
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn settings(&self) -> &SidebarSettings {
        &self.settings
    }

    /// Notifications shown so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Routes navigated to so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn route_intent(&mut self, intent: SidebarIntent) {
        let ctx = SidebarCtx {
            settings: &self.settings,
            view: self.view,
        };
        let effects = self.widget.reduce(intent, &ctx);
        self.queue.extend(effects.into_iter().map(SidebarEvent::Effect));
    }

    async fn route_effect(&mut self, effect: SidebarEffect) {
        use SidebarEffect as E;

        let follow_up = match effect {
            E::FetchMenu { generation } => {
                match self.service.fetch_menu_items().await {
                    Ok(snapshot) => SidebarIntent::MenuFetched {
                        generation,
                        snapshot,
                    },
                    Err(err) => SidebarIntent::FetchFailed {
                        generation,
                        message: err.to_string(),
                    },
                }
            },
            E::UpdateMenuItems { records } => {
                match self.service.update_menu_items(&records).await {
                    Ok(()) => SidebarIntent::UpdateCompleted,
                    Err(err) => SidebarIntent::UpdateFailed {
                        message: err.to_string(),
                    },
                }
            },
            E::CreatePage { parent, name } => {
                match self.create_page(parent.as_ref(), &name).await {
                    Ok(page) => SidebarIntent::PageCreated { page },
                    Err(err) => SidebarIntent::PageCreateFailed {
                        message: err.to_string(),
                    },
                }
            },
            E::Navigate { path } => {
                log::debug!("navigate to {path}");
                self.history.push(path.clone());
                SidebarIntent::RouteChanged { path }
            },
            E::Notify(notification) => {
                match notification.level {
                    NotificationLevel::Success => {
                        log::info!("{}", notification.message)
                    },
                    NotificationLevel::Warning | NotificationLevel::Error => {
                        log::warn!("{}", notification.message)
                    },
                }
                self.notifications.push(notification);
                return;
            },
            E::CloseDrawer => {
                SidebarIntent::DrawerVisibilityChanged { open: false }
            },
        };
        self.dispatch(follow_up);
    }

    async fn create_page(
        &mut self,
        parent: Option<&MenuItemId>,
        name: &str,
    ) -> Result<CreatedPage, ServiceError> {
        let page = self.service.create_page(parent, name).await?;
        self.service.create_block(&BlockDraft::text(&page.id)).await?;
        Ok(page)
    }
}
