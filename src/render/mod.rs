pub(crate) mod blur;
pub(crate) mod canvas;
pub(crate) mod compositor;
pub(crate) mod cpu;
pub(crate) mod layers;
pub(crate) mod paint;
pub(crate) mod recording;
pub(crate) mod text;
