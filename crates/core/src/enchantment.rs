//! Enchantment identifiers and levels.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! enchantments {
    ($($(#[$doc:meta])* $variant:ident => $key:literal,)+) => {
        /// Enchantments an operator can apply.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum EnchantmentType {
            $($(#[$doc])* $variant,)+
        }

        impl EnchantmentType {
            /// Every enchantment, in declaration order.
            pub const ALL: &'static [EnchantmentType] = &[$(EnchantmentType::$variant,)+];

            /// Canonical snake_case key used in commands and saves.
            pub const fn key(self) -> &'static str {
                match self {
                    $(EnchantmentType::$variant => $key,)+
                }
            }
        }
    };
}

enchantments! {
    /// Mining speed.
    Efficiency => "efficiency",
    /// Blocks drop themselves.
    SilkTouch => "silk_touch",
    /// Extra block drops.
    Fortune => "fortune",
    /// Melee damage.
    Sharpness => "sharpness",
    /// Melee knockback.
    Knockback => "knockback",
    /// Melee hits ignite.
    FireAspect => "fire_aspect",
    /// Arrow damage.
    Power => "power",
    /// Arrow knockback.
    Punch => "punch",
    /// Arrows ignite.
    Flame => "flame",
    /// Arrows are not consumed.
    Infinity => "infinity",
    /// All damage reduction.
    Protection => "protection",
    /// Fire damage reduction.
    FireProtection => "fire_protection",
    /// Explosion damage reduction.
    BlastProtection => "blast_protection",
    /// Projectile damage reduction.
    ProjectileProtection => "projectile_protection",
    /// Fall damage reduction.
    FeatherFalling => "feather_falling",
    /// Underwater breathing.
    Respiration => "respiration",
    /// Underwater mining speed.
    AquaAffinity => "aqua_affinity",
    /// Underwater movement.
    DepthStrider => "depth_strider",
    /// Slower durability loss.
    Unbreaking => "unbreaking",
    /// Experience repairs the item.
    Mending => "mending",
}

impl EnchantmentType {
    /// Look up an enchantment by its key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.key() == key)
    }

    /// Human-readable name ("Fire Aspect").
    pub fn display_name(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for EnchantmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// An enchantment at a level. Operator commands may go past the levels
/// reachable in survival, up to `u8::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// Which enchantment.
    pub enchantment_type: EnchantmentType,
    /// Its level.
    pub level: u8,
}

impl Enchantment {
    /// Enchantment at exactly `level`.
    pub fn with_level(enchantment_type: EnchantmentType, level: u8) -> Self {
        Self {
            enchantment_type,
            level,
        }
    }
}
