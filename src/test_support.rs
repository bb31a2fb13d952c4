//! Scripted stand-in for the VK API used by unit tests

use crate::error::{Error, Result};
use crate::http::{Params, VkApi};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers calls from a queue of canned results and records every call
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<JsonValue>>>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful `response` value
    pub fn respond(self, value: JsonValue) -> Self {
        self.responses.lock().unwrap().push_back(Ok(value));
        self
    }

    /// Queue an error
    pub fn fail(self, error: Error) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VkApi for ScriptedApi {
    async fn call(&self, method: &str, params: Params) -> Result<JsonValue> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other(format!("no scripted response for {method}"))))
    }
}
