//! Personalization filters: excluded tags and hidden models.

use std::collections::HashSet;

use crate::domain::Model;

/// Drop models carrying any excluded tag, preserving order.
pub fn filter_excluded_tags(models: Vec<Model>, excluded: &HashSet<String>) -> Vec<Model> {
    if excluded.is_empty() {
        return models;
    }
    models
        .into_iter()
        .filter(|model| !model.tags.iter().any(|tag| excluded.contains(tag)))
        .collect()
}

/// Drop models the user has hidden, preserving order.
pub fn filter_hidden_models(models: Vec<Model>, hidden: &HashSet<i64>) -> Vec<Model> {
    if hidden.is_empty() {
        return models;
    }
    models
        .into_iter()
        .filter(|model| !hidden.contains(&model.id))
        .collect()
}
