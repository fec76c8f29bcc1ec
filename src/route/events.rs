//! Events published around a controller action call.

use crate::http::Response;
use crate::value::Arguments;

/// What is being called: controller, action method and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCall {
    controller_name: String,
    action_name: String,
    action_params: Arguments,
}

impl ActionCall {
    /// Describes a call of `action_name` on `controller_name`.
    pub fn new(
        controller_name: impl Into<String>,
        action_name: impl Into<String>,
        action_params: Arguments,
    ) -> Self {
        Self {
            controller_name: controller_name.into(),
            action_name: action_name.into(),
            action_params,
        }
    }

    /// Identifier of the controller being called.
    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    /// Full action method name, e.g. `bazAction`.
    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    /// Resolved arguments of the action.
    pub fn action_params(&self) -> &Arguments {
        &self.action_params
    }
}

/// Published after arguments are resolved, before the action runs.
#[derive(Debug, Clone, PartialEq)]
pub struct BeforeCallActionEvent {
    call: ActionCall,
}

impl BeforeCallActionEvent {
    /// Creates the event.
    pub fn new(call: ActionCall) -> Self {
        Self { call }
    }

    /// The call this event describes.
    pub fn call(&self) -> &ActionCall {
        &self.call
    }

    /// Identifier of the controller being called.
    pub fn controller_name(&self) -> &str {
        self.call.controller_name()
    }

    /// Full action method name, e.g. `bazAction`.
    pub fn action_name(&self) -> &str {
        self.call.action_name()
    }
}

/// Published after the action returned. Whatever response the event
/// carries once every observer ran is what dispatch returns.
#[derive(Debug, Clone, PartialEq)]
pub struct AfterCallActionEvent {
    call: ActionCall,
    response: Response,
}

impl AfterCallActionEvent {
    /// Creates the event.
    pub fn new(call: ActionCall, response: Response) -> Self {
        Self { call, response }
    }

    /// The call this event describes.
    pub fn call(&self) -> &ActionCall {
        &self.call
    }

    /// Identifier of the controller being called.
    pub fn controller_name(&self) -> &str {
        self.call.controller_name()
    }

    /// Full action method name, e.g. `bazAction`.
    pub fn action_name(&self) -> &str {
        self.call.action_name()
    }

    /// Response as left by the previous observers.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Replaces the response dispatch will return.
    pub fn set_response(&mut self, response: Response) {
        self.response = response;
    }

    /// Consumes the event, returning its response.
    pub fn into_response(self) -> Response {
        self.response
    }
}
