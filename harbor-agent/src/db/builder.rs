use rstdev_storage::engine::rocksdb::db::DB;
use rstdev_storage::engine::rocksdb::options::Options;
use rstdev_storage::engine::rocksdb::lib::rust_rocksdb::merge_operator::MergeOperands;

use crate::common::types::CommonError;
use crate::config::{RocksDBCommon, RocksDBOptions};
use crate::Config;

use super::types::NAME_INDEX_PREFIX;
use super::{DbError, NameIndex, Runner};

fn merge_name_index(
    new_key: &[u8],
    existing: Option<&[u8]>,
    operands: &MergeOperands,
) -> Option<Vec<u8>> {
    let key = {
        match String::from_utf8(new_key.to_vec()) {
            Ok(key_val) => Some(key_val),
            Err(_) => None,
        }
    }
    .filter(|key| key.as_str().starts_with(NAME_INDEX_PREFIX));

    if key.is_none() {
        let existing_val = existing.map(|val| val.to_vec())?;
        return Some(existing_val);
    }

    let mut index = {
        existing.map_or_else(
            || Some(NameIndex::new()),
            |val| {
                let index_builder: Result<NameIndex, DbError> = val.to_vec().try_into();
                match index_builder {
                    Ok(index) => Some(index),
                    Err(_) => None,
                }
            },
        )
    }?;

    for op in operands {
        let op_name = {
            match String::from_utf8(op.to_vec()) {
                Ok(name) => Some(name),
                Err(_) => None,
            }
        };

        op_name.map(|name| {
            index.add(name);
        });
    }

    let output = {
        let index_bin_builder: Result<Vec<u8>, DbError> = index.try_into();
        match index_bin_builder {
            Ok(bin) => Some(bin),
            Err(_) => None,
        }
    };

    output
}

pub struct Builder {
    cfg: Config,
}

impl Builder {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn build<'a>(
        &'a mut self,
        db_callback: impl FnOnce(&Config) -> (RocksDBCommon, RocksDBOptions),
    ) -> Result<Runner<DB>, CommonError> {
        let (opts_common, opts_db) = db_callback(&self.cfg);
        let (opts_path, opts_cf_name) = opts_common.get();

        let opts_db_main = opts_db.clone();

        let mut db_opts = Options::new(opts_path, opts_cf_name);
        db_opts
            .build_default_opts()
            .set_db_opts(move |opt| {
                opt.create_if_missing(opts_db_main.get_create_if_missing());
                opt.create_missing_column_families(opts_db_main.get_create_missing_columns());
                opt.set_error_if_exists(opts_db_main.get_set_error_if_exists());
                opt.set_wal_dir(opts_db_main.get_set_wal_dir());

                opt
            })
            .set_cf_opts(|opt| {
                opt.set_merge_operator_associative("merge name index", merge_name_index);

                opt
            });

        let mut db = DB::new(db_opts).map_err(|err| CommonError::DBError(err.to_string()))?;
        let _ = db
            .build()
            .map_err(|err| CommonError::DBError(err.to_string()))?;

        Ok(Runner::new(db, self.cfg.to_owned()))
    }
}
