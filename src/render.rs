pub(crate) mod avatar;
pub(crate) mod background;
pub(crate) mod canvas;
pub(crate) mod composite;
pub(crate) mod mask;
pub(crate) mod text;
