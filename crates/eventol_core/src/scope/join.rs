//! SQL join planning for resolved relation paths.
//!
//! Identifiers come exclusively from static schema metadata; values are
//! always bound as parameters.

use crate::model::entity::EntityKind;
use crate::model::schema::{schema_of, Relation};
use crate::scope::path::FieldPath;

pub(crate) const ROOT_ALIAS: &str = "t0";

/// Accumulates the LEFT JOINs needed to read a set of field paths.
///
/// Paths sharing a relation prefix share the joined alias, so a scoping
/// path and a display path through `event_user` join it once.
pub(crate) struct JoinPlan {
    root: EntityKind,
    joins: Vec<String>,
    aliases: Vec<(Vec<&'static str>, String)>,
}

impl JoinPlan {
    pub(crate) fn new(root: EntityKind) -> Self {
        Self {
            root,
            joins: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Returns `alias.column` for `path`, adding joins as needed.
    pub(crate) fn column_ref(&mut self, path: &FieldPath) -> String {
        let mut alias = ROOT_ALIAS.to_string();
        let mut prefix = Vec::with_capacity(path.joins().len());
        for relation in path.joins() {
            prefix.push(relation.name);
            alias = self.alias_for(&prefix, &alias, relation);
        }
        format!("{alias}.{}", path.column())
    }

    /// `FROM` clause including every join added so far.
    pub(crate) fn from_clause(&self) -> String {
        let mut sql = format!("FROM {} AS {ROOT_ALIAS}", schema_of(self.root).table);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
        sql
    }

    fn alias_for(&mut self, prefix: &[&'static str], parent: &str, relation: &Relation) -> String {
        if let Some((_, alias)) = self.aliases.iter().find(|(known, _)| known == prefix) {
            return alias.clone();
        }

        let alias = format!("t{}", self.aliases.len() + 1);
        self.joins.push(format!(
            "LEFT JOIN {table} AS {alias} ON {alias}.id = {parent}.{column}",
            table = schema_of(relation.target).table,
            column = relation.column,
        ));
        self.aliases.push((prefix.to_vec(), alias.clone()));
        alias
    }
}

#[cfg(test)]
mod tests {
    use super::JoinPlan;
    use crate::model::entity::EntityKind;
    use crate::scope::path::{resolve_field_path, resolve_venue_path};

    #[test]
    fn shared_prefixes_join_once() {
        let scope = resolve_venue_path(EntityKind::Installation, "installer.event_user.venue")
            .expect("scope path");
        let username =
            resolve_field_path(EntityKind::Installation, "installer.event_user.user.username")
                .expect("username path");

        let mut plan = JoinPlan::new(EntityKind::Installation);
        assert_eq!(plan.column_ref(&scope), "t2.venue_id");
        assert_eq!(plan.column_ref(&username), "t3.username");
        assert_eq!(
            plan.from_clause(),
            "FROM installations AS t0 \
             LEFT JOIN installers AS t1 ON t1.id = t0.installer_id \
             LEFT JOIN event_users AS t2 ON t2.id = t1.event_user_id \
             LEFT JOIN users AS t3 ON t3.id = t2.user_id"
        );
    }

    #[test]
    fn root_columns_need_no_join() {
        let path = resolve_field_path(EntityKind::Room, "name").expect("name path");
        let mut plan = JoinPlan::new(EntityKind::Room);
        assert_eq!(plan.column_ref(&path), "t0.name");
        assert_eq!(plan.from_clause(), "FROM rooms AS t0");
    }
}
