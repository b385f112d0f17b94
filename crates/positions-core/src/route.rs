//! Views the client can show and who may see them.

/// Who may render a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Intended for visitors without a session. Signed-in visitors are tolerated.
    PublicOnly,
    /// Requires a stored credential.
    Protected,
}

/// A navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Intro,
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn access(&self) -> Access {
        match self {
            Route::Intro => Access::Public,
            Route::Login | Route::Register => Access::PublicOnly,
            Route::Dashboard => Access::Protected,
        }
    }

    /// Get the display title for this view.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Intro => "Welcome",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Dashboard => "Positions Dashboard",
        }
    }
}
