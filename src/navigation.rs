use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Search,
    Map,
}

/// Parameters the picker's screen was opened with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams {
    /// A saved location label picked from the user's saved places
    pub destination: Option<String>,
}

pub trait Navigator: Send + Sync {
    fn params(&self) -> RouteParams;
    fn navigate(&self, screen: Screen);
}

/// Keeps the pushed screens in a watch channel so a front end can follow along
pub struct StackNavigator {
    params: RouteParams,
    stack: watch::Sender<Vec<Screen>>,
}

impl StackNavigator {
    pub fn new(params: RouteParams) -> Self {
        let (stack, _) = watch::channel(vec![Screen::Search]);
        StackNavigator { params, stack }
    }

    pub fn current(&self) -> Screen {
        *self.stack.borrow().last().unwrap_or(&Screen::Search)
    }

    pub fn stack(&self) -> Vec<Screen> {
        self.stack.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Screen>> {
        self.stack.subscribe()
    }
}

impl Navigator for StackNavigator {
    fn params(&self) -> RouteParams {
        self.params.clone()
    }

    fn navigate(&self, screen: Screen) {
        info!(?screen, "navigate");
        self.stack.send_modify(|stack| stack.push(screen));
    }
}
