//! 시작 시점의 환경변수 스냅샷과 입력 계층 구현.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::application::input::{InputSource, env_var_name};

/// 실행 동안 고정되는 환경변수 사본. 빈 값은 없는 것으로 본다.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub fn from_process() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.vars
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// 에이전트가 태스크 입력을 넘기는 `INPUT_<NAME>` 환경변수.
pub struct TaskInputSource {
    env: Arc<EnvSnapshot>,
}

impl TaskInputSource {
    pub fn new(env: Arc<EnvSnapshot>) -> Self {
        Self { env }
    }

    pub fn variable_name(name: &str) -> String {
        format!("INPUT_{}", name.to_uppercase().replace(' ', "_"))
    }
}

impl InputSource for TaskInputSource {
    fn label(&self) -> &str {
        "task-input"
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.env.get(&Self::variable_name(name))
    }
}

/// 입력 이름에서 파생한 일반 환경변수(`api_key` → `API_KEY`).
pub struct DerivedEnvInputSource {
    env: Arc<EnvSnapshot>,
}

impl DerivedEnvInputSource {
    pub fn new(env: Arc<EnvSnapshot>) -> Self {
        Self { env }
    }
}

impl InputSource for DerivedEnvInputSource {
    fn label(&self) -> &str {
        "env"
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.env.get(&env_var_name(name))
    }
}
