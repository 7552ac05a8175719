pub mod yandex;

pub use yandex::YandexSearchProvider;
