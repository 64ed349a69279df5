pub mod hero;
pub mod power;

pub use hero::{
    CreateHeroRequest, HeroDraft, HeroDto, HeroRecord, ListHeroesQuery, UpdateHeroRequest,
};
pub use power::{PowerDto, PowerRecord};
