//! Option key naming.
//!
//! Keys are listed lowest precedence first. Attribute keys come in three
//! levels (global, depth, order index); class keys likewise, except the
//! order-level class key is built from the depth, as shipped menus rely on.

use serde::Serialize;

use crate::kind::{ElementKind, NodePosition};

/// Option keys consulted for one node, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideKeys {
    /// Keys whose values are attribute maps.
    pub atts: Vec<String>,

    /// Keys whose values are class strings or token lists.
    pub classes: Vec<String>,
}

impl OverrideKeys {
    /// Keys for `kind` at `position`. With `legacy_link_prefix`, link nodes
    /// also consult `link_atts*` just before each matching `a_atts*` key.
    pub fn for_node(kind: ElementKind, position: NodePosition, legacy_link_prefix: bool) -> Self {
        let depth = position.depth;

        let mut suffixes = vec![String::new(), format!("_{depth}")];
        if let Some(order) = position.order {
            suffixes.push(format!("_order_{order}"));
        }

        let legacy = kind.legacy_attr_prefix().filter(|_| legacy_link_prefix);
        let mut atts = Vec::with_capacity(suffixes.len() * 2);
        for suffix in &suffixes {
            if let Some(old) = legacy {
                atts.push(format!("{old}_atts{suffix}"));
            }
            atts.push(format!("{}_atts{suffix}", kind.prefix()));
        }

        let prefix = kind.prefix();
        let classes = vec![
            format!("{prefix}_class"),
            format!("{prefix}_class_{depth}"),
            format!("{prefix}_class_order_{depth}"),
        ];

        Self { atts, classes }
    }
}
