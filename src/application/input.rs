//! 계층형 태스크 입력 해석기.
//!
//! 앞선 계층이 우선한다(명시 입력 → CI 태스크 입력 → 환경변수 → 기본값).

use std::collections::HashMap;

use crate::domain::error::TaskError;

/// 입력 값을 제공하는 한 계층.
pub trait InputSource: Send + Sync {
    /// 진단 출력용 계층 이름
    fn label(&self) -> &str;
    fn lookup(&self, name: &str) -> Option<String>;
}

/// 입력 이름에서 환경변수 이름을 만든다(`a.b_c` → `A_B_C`).
pub fn env_var_name(name: &str) -> String {
    name.to_uppercase().replace('.', "_")
}

/// 고정 맵 기반 계층(명시 입력, 기본값).
pub struct MapInputSource {
    label: String,
    values: HashMap<String, String>,
}

impl MapInputSource {
    pub fn new(label: impl Into<String>, values: HashMap<String, String>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn from_pairs<K, V>(label: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            label,
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl InputSource for MapInputSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub value: String,
    pub source: String,
}

pub struct InputResolver {
    layers: Vec<Box<dyn InputSource>>,
}

impl InputResolver {
    pub fn new(layers: Vec<Box<dyn InputSource>>) -> Self {
        Self { layers }
    }

    /// 비어 있지 않은 첫 값을 출처와 함께 반환한다.
    pub fn resolve(&self, name: &str) -> Option<ResolvedInput> {
        self.layers.iter().find_map(|layer| {
            layer
                .lookup(name)
                .filter(|v| !v.trim().is_empty())
                .map(|value| ResolvedInput {
                    value,
                    source: layer.label().to_string(),
                })
        })
    }

    pub fn get(&self, name: &str, required: bool) -> Result<String, TaskError> {
        match self.resolve(name) {
            Some(resolved) => Ok(resolved.value),
            None if required => Err(TaskError::MissingInput(name.to_string())),
            None => Ok(String::new()),
        }
    }

    pub fn get_optional(&self, name: &str) -> Option<String> {
        self.resolve(name).map(|r| r.value.trim().to_string())
    }

    /// `true`(대소문자 무시)만 참으로 본다.
    pub fn get_bool(&self, name: &str) -> bool {
        self.resolve(name)
            .is_some_and(|r| r.value.trim().eq_ignore_ascii_case("true"))
    }
}
