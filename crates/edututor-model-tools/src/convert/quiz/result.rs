use crate::convert::TryFromDbModel;
use crate::error::ConversionError;
use edututor_entity::quiz::result::Model as QuizResultModel;
use edututor_model::quiz::Difficulty;
use edututor_model::quiz::score::ScoreRecord;
use std::str::FromStr;

impl TryFromDbModel<QuizResultModel> for ScoreRecord {
    type Error = ConversionError;

    fn try_from_db_model(model: QuizResultModel) -> Result<Self, Self::Error> {
        let difficulty =
            Difficulty::from_str(&model.difficulty).map_err(|_| ConversionError::UnknownDifficulty(model.difficulty))?;
        let out_of_range = ConversionError::ScoreOutOfRange {
            score: model.score,
            total: model.total,
        };
        if model.score > model.total {
            return Err(out_of_range);
        }
        let (Ok(score), Ok(total)) = (u32::try_from(model.score), u32::try_from(model.total)) else {
            return Err(out_of_range);
        };
        Ok(Self {
            user_id: model.user_id,
            subject: model.subject,
            topic: model.topic,
            difficulty,
            score,
            total,
            timestamp: model.timestamp,
        })
    }
}
