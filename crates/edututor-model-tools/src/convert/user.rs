use crate::convert::{FromDbModel, FromModel};
use edututor_entity::user::Model as UserModel;
use edututor_entity::user::Role as RoleModel;
use edututor_model::user::{Role, User};

impl FromDbModel<RoleModel> for Role {
    fn from_db_model(model: RoleModel) -> Self {
        match model {
            RoleModel::Student => Self::Student,
            RoleModel::Educator => Self::Educator,
        }
    }
}

impl FromModel<Role> for RoleModel {
    fn from_model(model: Role) -> Self {
        match model {
            Role::Student => Self::Student,
            Role::Educator => Self::Educator,
        }
    }
}

impl FromDbModel<UserModel> for User {
    fn from_db_model(model: UserModel) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: Role::from_db_model(model.role),
            created_at: model.created_at,
        }
    }
}
