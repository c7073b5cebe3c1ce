use std::rc::Rc;

/// Acciones que la vista dispara. Las construye `App` con el ViewModel.
#[derive(Clone)]
pub struct RouteActions {
    pub on_origin: Rc<dyn Fn(String)>,
    pub on_destination: Rc<dyn Fn(String)>,
    pub on_calculate: Rc<dyn Fn()>,
    pub on_clear: Rc<dyn Fn()>,
    pub on_recenter: Rc<dyn Fn()>,
    pub on_retry: Rc<dyn Fn()>,
}
