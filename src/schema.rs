//! 声明式 JSON 结构校验
//!
//! 校验是纯函数：完整遍历整棵数据树，返回全部违规项，而不是遇到第一个错误就停止。

use crate::error::Violation;
use serde_json::Value;

/// 列表长度约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Any,
    Exact(usize),
    Range { min: usize, max: usize },
}

impl Length {
    fn check(&self, len: usize) -> Option<String> {
        match *self {
            Length::Any => None,
            Length::Exact(n) if len != n => Some(format!("长度应为 {n}，实际为 {len}")),
            Length::Range { min, .. } if len < min => {
                Some(format!("长度至少为 {min}，实际为 {len}"))
            }
            Length::Range { max, .. } if len > max => {
                Some(format!("长度至多为 {max}，实际为 {len}"))
            }
            _ => None,
        }
    }
}

/// 结构描述
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// 固定键集合的对象，键全部必填，不允许多余键
    Dict(Vec<(&'static str, Schema)>),
    /// 同构列表
    List { item: Box<Schema>, len: Length },
    /// 定长异构元组（JSON 数组）
    Tuple(Vec<Schema>),
    /// 0..=255 的整数
    UInt8,
}

impl Schema {
    pub fn dict(fields: Vec<(&'static str, Schema)>) -> Self {
        Schema::Dict(fields)
    }

    pub fn list(item: Schema) -> Self {
        Schema::List {
            item: Box::new(item),
            len: Length::Any,
        }
    }

    pub fn list_exact(item: Schema, n: usize) -> Self {
        Schema::List {
            item: Box::new(item),
            len: Length::Exact(n),
        }
    }

    pub fn tuple(items: Vec<Schema>) -> Self {
        Schema::Tuple(items)
    }

    /// 校验数据树，返回全部违规项（空表示通过）
    pub fn validate(&self, value: &Value) -> Vec<Violation> {
        let mut out = Vec::new();
        self.walk(value, "", &mut out);
        out
    }

    fn walk(&self, value: &Value, path: &str, out: &mut Vec<Violation>) {
        match self {
            Schema::Dict(fields) => {
                let Some(map) = value.as_object() else {
                    out.push(Violation::new(path, format!("应为对象，实际为{}", kind(value))));
                    return;
                };
                for (key, schema) in fields {
                    let child = join(path, key);
                    match map.get(*key) {
                        Some(v) => schema.walk(v, &child, out),
                        None => out.push(Violation::new(child, "缺少必填字段")),
                    }
                }
                for key in map.keys() {
                    if !fields.iter().any(|(k, _)| *k == key.as_str()) {
                        out.push(Violation::new(join(path, key), "未知字段"));
                    }
                }
            }
            Schema::List { item, len } => {
                let Some(items) = value.as_array() else {
                    out.push(Violation::new(path, format!("应为数组，实际为{}", kind(value))));
                    return;
                };
                if let Some(msg) = len.check(items.len()) {
                    out.push(Violation::new(path, msg));
                }
                for (i, v) in items.iter().enumerate() {
                    item.walk(v, &join(path, &i.to_string()), out);
                }
            }
            Schema::Tuple(schemas) => {
                let Some(items) = value.as_array() else {
                    out.push(Violation::new(path, format!("应为数组，实际为{}", kind(value))));
                    return;
                };
                if items.len() != schemas.len() {
                    out.push(Violation::new(
                        path,
                        format!("长度应为 {}，实际为 {}", schemas.len(), items.len()),
                    ));
                }
                for (i, (schema, v)) in schemas.iter().zip(items).enumerate() {
                    schema.walk(v, &join(path, &i.to_string()), out);
                }
            }
            Schema::UInt8 => match value.as_u64() {
                Some(n) if n <= u8::MAX as u64 => {}
                Some(n) => out.push(Violation::new(path, format!("{n} 超出范围 0..=255"))),
                None if value.as_i64().is_some() => out.push(Violation::new(
                    path,
                    format!("{value} 超出范围 0..=255"),
                )),
                None => out.push(Violation::new(path, format!("应为整数，实际为{}", kind(value)))),
            },
        }
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "布尔值",
        Value::Number(_) => "数字",
        Value::String(_) => "字符串",
        Value::Array(_) => "数组",
        Value::Object(_) => "对象",
    }
}
