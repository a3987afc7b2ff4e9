use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Renderer-facing layer class name, e.g. `ScatterplotLayer`.
    fn kind(&self) -> &'static str;
}
