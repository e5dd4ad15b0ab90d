use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    entity::ngo_partners::{Column, Entity as NgoPartners, Model as NgoModel},
    error::AppResult,
    models::NgoPartner,
    state::AppState,
};

pub async fn list_ngos(state: &AppState) -> AppResult<Vec<NgoPartner>> {
    let partners = NgoPartners::find()
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ngo_from_entity)
        .collect();
    Ok(partners)
}

fn ngo_from_entity(model: NgoModel) -> NgoPartner {
    NgoPartner {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        location: model.location,
        latitude: model.latitude,
        longitude: model.longitude,
        needs: model.needs,
    }
}
