//! The finite set of component categories a node can be classified into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of UI component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Layout
    /// Generic layout container, also the universal fallback.
    Container,
    Stack,
    Card,
    CardHeader,
    CardContent,
    CardActions,
    AppBar,
    List,
    ListItem,
    Divider,

    // Content
    /// Text label.
    Typography,
    Avatar,
    Icon,
    Badge,
    Chip,

    // Interactive
    Button,
    IconButton,
    TextField,
    Checkbox,
    Switch,
    Radio,
    Tabs,
    Tab,

    // Feedback
    Alert,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 24] = [
        Self::Container,
        Self::Stack,
        Self::Card,
        Self::CardHeader,
        Self::CardContent,
        Self::CardActions,
        Self::AppBar,
        Self::List,
        Self::ListItem,
        Self::Divider,
        Self::Typography,
        Self::Avatar,
        Self::Icon,
        Self::Badge,
        Self::Chip,
        Self::Button,
        Self::IconButton,
        Self::TextField,
        Self::Checkbox,
        Self::Switch,
        Self::Radio,
        Self::Tabs,
        Self::Tab,
        Self::Alert,
    ];

    /// Stable lower-case key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Stack => "stack",
            Self::Card => "card",
            Self::CardHeader => "card_header",
            Self::CardContent => "card_content",
            Self::CardActions => "card_actions",
            Self::AppBar => "app_bar",
            Self::List => "list",
            Self::ListItem => "list_item",
            Self::Divider => "divider",
            Self::Typography => "typography",
            Self::Avatar => "avatar",
            Self::Icon => "icon",
            Self::Badge => "badge",
            Self::Chip => "chip",
            Self::Button => "button",
            Self::IconButton => "icon_button",
            Self::TextField => "text_field",
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
            Self::Radio => "radio",
            Self::Tabs => "tabs",
            Self::Tab => "tab",
            Self::Alert => "alert",
        }
    }

    /// Symbol of the rendered element in the target component library.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Container => "Box",
            Self::Stack => "Stack",
            Self::Card => "Card",
            Self::CardHeader => "CardHeader",
            Self::CardContent => "CardContent",
            Self::CardActions => "CardActions",
            Self::AppBar => "AppBar",
            Self::List => "List",
            Self::ListItem => "ListItem",
            Self::Divider => "Divider",
            Self::Typography => "Typography",
            Self::Avatar => "Avatar",
            Self::Icon => "SvgIcon",
            Self::Badge => "Badge",
            Self::Chip => "Chip",
            Self::Button => "Button",
            Self::IconButton => "IconButton",
            Self::TextField => "TextField",
            Self::Checkbox => "Checkbox",
            Self::Switch => "Switch",
            Self::Radio => "Radio",
            Self::Tabs => "Tabs",
            Self::Tab => "Tab",
            Self::Alert => "Alert",
        }
    }

    /// Parse a category from its key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// Whether this is the generic container fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Container)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
