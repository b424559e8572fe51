use rst_common::with_tokio::tokio::task::spawn_blocking;
use rstdev_storage::engine::rocksdb::db::DB;
use rstdev_storage::types::Storage;

use crate::config::{Database, RocksDBCommon};
use crate::Config;

use super::types::{DbError, Instruction, OutputOpts};

#[derive(Clone)]
pub struct Runner<TStorage>
where
    TStorage: Storage<Instance = DB>,
{
    instance: TStorage,
    cfg: Config,
}

impl<TStorage> Runner<TStorage>
where
    TStorage: Storage<Instance = DB>,
{
    pub fn new(instance: TStorage, cfg: Config) -> Self {
        Self { instance, cfg }
    }

    pub fn get_cf_def(&self, callback: impl FnOnce(&Database) -> RocksDBCommon) -> String {
        let common = callback(self.cfg.db());
        let (_, cf) = common.get();

        cf
    }
}

impl Runner<DB> {
    pub async fn exec(&self, instruction: Instruction) -> Result<OutputOpts, DbError> {
        let instance = self.instance.clone().get_instance();

        let db_instance = instance
            .db
            .clone()
            .ok_or(DbError::ExecError("db instance is missing".to_string()))?;

        let cf_def = self.get_cf_def(|db| db.agent.get_common());

        match instruction {
            Instruction::SaveCf { key, value } => {
                spawn_blocking(move || {
                    let cf = db_instance
                        .cf_handle(cf_def.as_str())
                        .map(|val| val.to_owned())
                        .ok_or(DbError::ExecError("cf handler failed".to_string()))?;

                    db_instance
                        .put_cf(cf, key, value)
                        .map_err(|err| DbError::ExecError(err.to_string()))
                })
                .await
                .map_err(|err| DbError::ExecError(err.to_string()))??;

                Ok(OutputOpts::None)
            }
            Instruction::MergeCf { key, value } => {
                spawn_blocking(move || {
                    let cf = db_instance
                        .cf_handle(cf_def.as_str())
                        .map(|val| val.to_owned())
                        .ok_or(DbError::ExecError("cf handler failed".to_string()))?;

                    db_instance
                        .merge_cf(cf, key, value)
                        .map_err(|err| DbError::ExecError(err.to_string()))
                })
                .await
                .map_err(|err| DbError::ExecError(err.to_string()))??;

                Ok(OutputOpts::None)
            }
            Instruction::GetCf { key } => {
                let value = spawn_blocking(move || {
                    let cf = db_instance
                        .cf_handle(cf_def.as_str())
                        .map(|val| val.to_owned())
                        .ok_or(DbError::ExecError("cf handler failed".to_string()))?;

                    db_instance
                        .get_cf(cf, key)
                        .map_err(|err| DbError::ExecError(err.to_string()))
                })
                .await
                .map_err(|err| DbError::ExecError(err.to_string()))??;

                Ok(OutputOpts::SingleByte { value })
            }
        }
    }
}
