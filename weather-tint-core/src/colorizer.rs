use std::{collections::HashMap, fmt::Debug, sync::Arc};

use tracing::debug;

use crate::{
    drawable::{
        CelsiusTemperature, Drawable, DrawableItem, FahrenheitTemperature, ItemKind, WeatherIcon,
    },
    error::{PaletteError, RegistryError},
    palette::{IconPalette, Palette, TemperaturePalette},
};

pub trait Colorizer: Send + Sync + Debug {
    /// Item text prefixed with its color escape. The caller appends the reset.
    fn paint_colored(&self, item: &DrawableItem) -> Result<String, PaletteError>;

    fn paint_plain(&self, item: &DrawableItem) -> String;
}

/// Colorizer backed by a single palette.
#[derive(Debug, Clone, Default)]
pub struct Painter<P> {
    palette: P,
}

impl<P: Palette> Painter<P> {
    pub fn new(palette: P) -> Self {
        Self { palette }
    }
}

impl<P: Palette> Colorizer for Painter<P> {
    fn paint_colored(&self, item: &DrawableItem) -> Result<String, PaletteError> {
        let color = self.palette.color_for(item)?;
        Ok(format!("{}{}", color.escape(), item.draw()))
    }

    fn paint_plain(&self, item: &DrawableItem) -> String {
        item.draw()
    }
}

pub type TemperaturePainter = Painter<TemperaturePalette>;
pub type IconPainter = Painter<IconPalette>;

/// Colorizers keyed by the item kind they paint. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ColorizerRegistry {
    colorizers: HashMap<ItemKind, Arc<dyn Colorizer>>,
}

impl ColorizerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Temperatures of both scales share one temperature painter; icons get
    /// the icon painter.
    pub fn standard() -> Self {
        let temperature: Arc<dyn Colorizer> = Arc::new(TemperaturePainter::new(TemperaturePalette));
        let icon: Arc<dyn Colorizer> = Arc::new(IconPainter::new(IconPalette));

        Self::builder()
            .subscribe::<CelsiusTemperature>(Arc::clone(&temperature))
            .subscribe::<FahrenheitTemperature>(temperature)
            .subscribe::<WeatherIcon>(icon)
            .build()
    }

    pub fn lookup(&self, item: &DrawableItem) -> Result<&dyn Colorizer, RegistryError> {
        self.lookup_kind(item.kind())
    }

    pub fn lookup_kind(&self, kind: ItemKind) -> Result<&dyn Colorizer, RegistryError> {
        self.colorizers
            .get(&kind)
            .map(|c| c.as_ref())
            .ok_or(RegistryError::Unregistered(kind))
    }

    pub fn contains(&self, kind: ItemKind) -> bool {
        self.colorizers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.colorizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colorizers.is_empty()
    }
}

/// Collects subscriptions during startup. The first colorizer subscribed
/// for a kind wins; later subscriptions for that kind are ignored.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    colorizers: HashMap<ItemKind, Arc<dyn Colorizer>>,
}

impl RegistryBuilder {
    pub fn subscribe<T: Drawable>(self, colorizer: Arc<dyn Colorizer>) -> Self {
        self.subscribe_kind(ItemKind::of::<T>(), colorizer)
    }

    pub fn subscribe_kind(mut self, kind: ItemKind, colorizer: Arc<dyn Colorizer>) -> Self {
        if self.colorizers.contains_key(&kind) {
            debug!(%kind, "colorizer already subscribed, keeping the first one");
        } else {
            debug!(%kind, ?colorizer, "subscribed colorizer");
            self.colorizers.insert(kind, colorizer);
        }
        self
    }

    pub fn build(self) -> ColorizerRegistry {
        ColorizerRegistry { colorizers: self.colorizers }
    }
}
