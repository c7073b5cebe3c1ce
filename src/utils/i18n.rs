// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "ES" => {
            // Panel
            translations.insert("origin", "Origen");
            translations.insert("destination", "Destino");
            translations.insert("calculate", "Calcular");
            translations.insert("calculating", "Calculando...");
            translations.insert("clear", "Limpiar");
            translations.insert("recenter", "Recentrar");
            translations.insert("distance", "Distancia");
            translations.insert("duration", "Duración");

            // Carga del SDK
            translations.insert("loading_map", "Cargando mapa...");
            translations.insert("retry", "Reintentar");

            // Errores
            translations.insert("error_not_ready", "El mapa todavía no está listo");
            translations.insert("error_sdk_load", "No se pudo cargar Google Maps");
            translations.insert("error_api_key", "La clave de Google Maps falta o no es válida");
            translations.insert("error_not_found", "No se encontró el origen o el destino");
            translations.insert("error_no_route", "No hay ruta en coche entre estos lugares");
            translations.insert("error_denied", "El servicio de mapas rechazó la petición");
            translations.insert("error_offline", "Sin conexión a internet");
            translations.insert("error_network", "Error de red, inténtalo de nuevo");
        }
        "FR" => {
            // Panel
            translations.insert("origin", "Départ");
            translations.insert("destination", "Arrivée");
            translations.insert("calculate", "Calculer");
            translations.insert("calculating", "Calcul en cours...");
            translations.insert("clear", "Effacer");
            translations.insert("recenter", "Recentrer");
            translations.insert("distance", "Distance");
            translations.insert("duration", "Durée");

            // Carga del SDK
            translations.insert("loading_map", "Chargement de la carte...");
            translations.insert("retry", "Réessayer");

            // Errores
            translations.insert("error_not_ready", "La carte n'est pas encore prête");
            translations.insert("error_sdk_load", "Impossible de charger Google Maps");
            translations.insert("error_api_key", "La clé Google Maps est absente ou invalide");
            translations.insert("error_not_found", "Départ ou arrivée introuvable");
            translations.insert("error_no_route", "Aucun itinéraire en voiture entre ces lieux");
            translations.insert("error_denied", "Le service de cartes a refusé la requête");
            translations.insert("error_offline", "Pas de connexion internet");
            translations.insert("error_network", "Erreur réseau, réessayez");
        }
        _ => {
            // Panel
            translations.insert("origin", "Origin");
            translations.insert("destination", "Destination");
            translations.insert("calculate", "Calculate");
            translations.insert("calculating", "Calculating...");
            translations.insert("clear", "Clear");
            translations.insert("recenter", "Re-center");
            translations.insert("distance", "Distance");
            translations.insert("duration", "Duration");

            // Carga del SDK
            translations.insert("loading_map", "Loading map...");
            translations.insert("retry", "Retry");

            // Errores
            translations.insert("error_not_ready", "The map is not ready yet");
            translations.insert("error_sdk_load", "Google Maps could not be loaded");
            translations.insert("error_api_key", "The Google Maps API key is missing or invalid");
            translations.insert("error_not_found", "Origin or destination not found");
            translations.insert("error_no_route", "No driving route between these places");
            translations.insert("error_denied", "The maps service denied the request");
            translations.insert("error_offline", "You are offline");
            translations.insert("error_network", "Network error, please try again");
        }
    }

    translations
}

/// Función de traducción
///
/// # Arguments
/// * `key` - Clave de traducción
/// * `lang` - Idioma ("EN", "ES" o "FR"; cualquier otro cae en "EN")
///
/// # Returns
/// String traducida o la clave si no se encuentra traducción
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    // Fallback: devolver la clave si no hay traducción
    key.to_string()
}
