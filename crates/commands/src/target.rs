//! Entity target selectors (`@s`, `@p`, `@a`, `@e`, player names).

use std::fmt;

use cmdplus_world::{EntityId, EntityType};

use crate::error::CommandError;
use crate::host::{CommandHost, CommandSource};
use crate::reader::StringReader;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectorBase {
    Source,
    NearestPlayer,
    AllPlayers,
    AllEntities,
    Player(String),
}

/// A parsed target selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySelector {
    base: SelectorBase,
    entity_type: Option<EntityType>,
    name: Option<String>,
    id: Option<u64>,
    limit: Option<usize>,
}

impl EntitySelector {
    fn new(base: SelectorBase) -> Self {
        Self {
            base,
            entity_type: None,
            name: None,
            id: None,
            limit: None,
        }
    }

    /// Selector naming a single player.
    pub fn player(name: &str) -> Self {
        Self::new(SelectorBase::Player(name.to_string()))
    }

    pub fn parse(reader: &mut StringReader<'_>) -> Result<Self, CommandError> {
        let start = reader.cursor();
        if reader.peek() != Some('@') {
            let name = reader.read_unquoted();
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(CommandError::parse(
                    format!("Invalid name or selector '{name}'"),
                    start,
                ));
            }
            return Ok(Self::player(name));
        }

        reader.skip();
        let base = match reader.peek() {
            Some('s') => SelectorBase::Source,
            Some('p') => SelectorBase::NearestPlayer,
            Some('a') => SelectorBase::AllPlayers,
            Some('e') => SelectorBase::AllEntities,
            _ => return Err(CommandError::parse("Unknown selector type", start)),
        };
        reader.skip();
        let mut selector = Self::new(base);

        if reader.peek() == Some('[') {
            reader.skip();
            selector.parse_filters(reader)?;
        }
        if reader.peek().is_some_and(|c| !c.is_whitespace()) {
            return Err(reader.error("Unexpected characters after selector"));
        }
        Ok(selector)
    }

    fn parse_filters(&mut self, reader: &mut StringReader<'_>) -> Result<(), CommandError> {
        loop {
            reader.skip_whitespace();
            if reader.peek() == Some(']') {
                reader.skip();
                return Ok(());
            }

            let key_start = reader.cursor();
            let key = read_filter_token(reader, &['=']);
            if reader.peek() != Some('=') {
                return Err(reader.error(format!("Expected '=' after option '{key}'")));
            }
            reader.skip();
            let value_start = reader.cursor();
            let value = if reader.peek() == Some('"') {
                reader.read_string()?
            } else {
                read_filter_token(reader, &[',', ']']).to_string()
            };
            let bad_value =
                |what: &str| CommandError::parse(format!("Invalid {what} '{value}'"), value_start);

            match key {
                "type" => {
                    let path = value.strip_prefix("minecraft:").unwrap_or(&value);
                    self.entity_type =
                        Some(EntityType::from_key(path).ok_or_else(|| bad_value("entity type"))?);
                }
                "name" => self.name = Some(value.clone()),
                "id" => self.id = Some(value.parse().map_err(|_| bad_value("entity id"))?),
                "limit" => {
                    let limit: usize = value.parse().map_err(|_| bad_value("limit"))?;
                    if limit == 0 {
                        return Err(CommandError::parse("Limit must be at least 1", value_start));
                    }
                    self.limit = Some(limit);
                }
                _ => {
                    return Err(CommandError::parse(
                        format!("Unknown option '{key}'"),
                        key_start,
                    ))
                }
            }

            reader.skip_whitespace();
            match reader.peek() {
                Some(',') => reader.skip(),
                Some(']') => {}
                _ => return Err(reader.error("Expected ',' or ']' in selector options")),
            }
        }
    }

    /// Entities matched by this selector, in selection order.
    pub fn resolve(&self, host: &dyn CommandHost, source: &CommandSource) -> Vec<EntityId> {
        let accepts = |entity: &cmdplus_world::Entity| {
            self.entity_type.map_or(true, |t| entity.entity_type == t)
                && self
                    .name
                    .as_deref()
                    .map_or(true, |name| entity.name.as_deref() == Some(name))
                && self.id.map_or(true, |id| entity.id.0 == id)
        };

        let mut selected: Vec<&cmdplus_world::Entity> = match &self.base {
            SelectorBase::Source => source
                .entity
                .and_then(|id| host.entity(id))
                .into_iter()
                .filter(|e| accepts(e))
                .collect(),
            SelectorBase::Player(name) => host
                .entities()
                .filter(|e| e.entity_type == EntityType::Player && e.name.as_deref() == Some(name))
                .take(1)
                .collect(),
            SelectorBase::NearestPlayer => {
                let mut players: Vec<_> = host
                    .entities()
                    .filter(|e| e.entity_type == EntityType::Player && accepts(e))
                    .collect();
                // Stable sort keeps ascending id among equidistant players
                players.sort_by(|a, b| {
                    a.distance_sq(source.position)
                        .total_cmp(&b.distance_sq(source.position))
                });
                players.truncate(1);
                players
            }
            SelectorBase::AllPlayers => host
                .entities()
                .filter(|e| e.entity_type == EntityType::Player && accepts(e))
                .collect(),
            SelectorBase::AllEntities => host.entities().filter(|e| accepts(e)).collect(),
        };

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected.into_iter().map(|e| e.id).collect()
    }
}

fn read_filter_token<'a>(reader: &mut StringReader<'a>, stops: &[char]) -> &'a str {
    let rest = reader.remaining();
    let end = rest
        .find(|c: char| stops.contains(&c) || c.is_whitespace())
        .unwrap_or(rest.len());
    for _ in rest[..end].chars() {
        reader.skip();
    }
    &rest[..end]
}

impl fmt::Display for EntitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            SelectorBase::Player(name) => return f.write_str(name),
            SelectorBase::Source => f.write_str("@s")?,
            SelectorBase::NearestPlayer => f.write_str("@p")?,
            SelectorBase::AllPlayers => f.write_str("@a")?,
            SelectorBase::AllEntities => f.write_str("@e")?,
        }
        let mut options = Vec::new();
        if let Some(t) = self.entity_type {
            options.push(format!("type={t}"));
        }
        if let Some(name) = &self.name {
            options.push(format!("name={name}"));
        }
        if let Some(id) = self.id {
            options.push(format!("id={id}"));
        }
        if let Some(limit) = self.limit {
            options.push(format!("limit={limit}"));
        }
        if !options.is_empty() {
            write!(f, "[{}]", options.join(","))?;
        }
        Ok(())
    }
}
