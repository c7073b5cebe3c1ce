// ============================================================================
// APP STATE - Tipos de actualización del DOM
// ============================================================================

/// Tipo de actualización del DOM
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateType {
    /// Actualización incremental (solo elementos específicos)
    Incremental(IncrementalUpdate),
    /// Re-render completo (cambio de estado del SDK: Loading → Ready / Failed)
    FullRender,
}

/// Tipo de actualización incremental específica
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Textos de distancia y duración
    RouteSummary,
    /// Botón Calculate ocupado / línea de error
    SearchStatus,
    /// Valores mostrados en los inputs de origen y destino
    Inputs,
}
