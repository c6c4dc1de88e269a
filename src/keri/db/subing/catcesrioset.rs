use crate::cesr::Parsable;
use crate::keri::db::dbing::LMDBer;
use crate::keri::db::subing::catcesr::CatCesrSuberBase;
use crate::keri::db::subing::ioset::IoSetSuber;
use crate::keri::db::subing::SuberError;
use crate::Matter;
use std::sync::Arc;

pub struct CatCesrIoSetSuber<'db, M: Matter> {
    pub base: CatCesrSuberBase<'db, M>,
    pub io_set_suber: IoSetSuber<'db>,
}

impl<'db, M: Matter + Parsable> CatCesrIoSetSuber<'db, M> {
    pub fn new(
        db: Arc<&'db LMDBer>,
        subkey: &str,
        formats: Vec<String>,
        sep: Option<u8>,
        verify: bool,
    ) -> Result<Self, SuberError> {
        let base = CatCesrSuberBase::new(db.clone(), subkey, formats, sep, verify)?;
        let io_set_suber = IoSetSuber::new(db, subkey, sep, verify)?;

        Ok(Self { base, io_set_suber })
    }

    // Wrapper methods from CatCesrSuberBase (base)
    pub fn ser(&self, val: &[&dyn Matter]) -> Result<Vec<u8>, SuberError> {
        self.base.ser(val)
    }

    pub fn des(&self, val: &[u8]) -> Result<Vec<Box<dyn Matter>>, SuberError> {
        self.base.des(val)
    }

    // Wrapper methods from IoSetSuber (io_set_suber)
    pub fn put<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
        vals: &[&dyn Matter],
    ) -> Result<bool, SuberError> {
        let sval = self.ser(vals)?;
        let sbuf = vec![&sval];
        self.io_set_suber.put(keys, &sbuf)
    }

    pub fn add<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
        vals: &[&dyn Matter],
    ) -> Result<bool, SuberError> {
        let sval = self.ser(vals)?;
        self.io_set_suber.add(keys, &sval)
    }

    pub fn pin<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
        valss: &[&[&dyn Matter]], // Now accepts an array of arrays of Matter
    ) -> Result<bool, SuberError> {
        let mut sbuf = Vec::with_capacity(valss.len());
        for vals in valss {
            sbuf.push(self.ser(vals)?);
        }
        self.io_set_suber
            .pin(keys, &sbuf.iter().collect::<Vec<_>>())
    }

    pub fn get<K: AsRef<[u8]>>(&self, keys: &[K]) -> Result<Vec<Vec<Box<dyn Matter>>>, SuberError> {
        let vals = self.io_set_suber.get::<K, Vec<u8>>(keys)?;
        let mut result = vec![];

        for val in vals {
            result.push(self.des(&val)?);
        }

        Ok(result)
    }

    pub fn get_iter<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
    ) -> Result<Vec<Result<Vec<Box<dyn Matter>>, SuberError>>, SuberError> {
        // Get the Vec<u8> iterator from io_set_suber
        let iter = self.io_set_suber.get_iter::<K, Vec<u8>>(keys)?;

        // Collect and transform each result
        let mut results = Vec::new();
        for val_result in iter {
            let matter_result = match val_result {
                Ok(val) => self.des(&val),
                Err(e) => Err(e),
            };
            results.push(matter_result);
        }

        Ok(results)
    }

    pub fn get_last<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
    ) -> Result<Option<Vec<Box<dyn Matter>>>, SuberError> {
        match self.io_set_suber.get_last::<K, Vec<u8>>(keys)? {
            Some(val) => {
                let deserialized = self.des(&val)?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub fn rem<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
        vals: Option<&[&dyn Matter]>, // Changed to accept an array of Matter
    ) -> Result<bool, SuberError> {
        match vals {
            Some(vs) => {
                let sval = self.ser(vs)?; // Now we serialize all the values
                self.io_set_suber.rem(keys, Some(&sval))
            }
            None => self.io_set_suber.rem::<K, Vec<u8>>(keys, None),
        }
    }

    pub fn cnt<K: AsRef<[u8]>>(&self, keys: &[K]) -> Result<usize, SuberError> {
        self.io_set_suber.cnt(keys)
    }

    pub fn get_item_iter<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
        topive: bool,
    ) -> Result<Vec<(Vec<Vec<u8>>, Vec<Box<dyn Matter>>)>, SuberError> {
        let items = self
            .io_set_suber
            .get_item_iter::<K, Vec<u8>>(keys, topive)?;
        self.process_items(items)
    }

    // Helper method for processing items (similar to CatCesrSuber)
    pub fn process_items(
        &self,
        items: Vec<(Vec<Vec<u8>>, Vec<u8>)>,
    ) -> Result<Vec<(Vec<Vec<u8>>, Vec<Box<dyn Matter>>)>, SuberError> {
        let mut result = Vec::with_capacity(items.len());

        for (key, val) in items {
            let deserialized = self.des(&val)?;
            result.push((key, deserialized));
        }

        Ok(result)
    }

    // Wrapper methods from SuberBase (base.base.base)
    pub fn to_key<K: AsRef<[u8]>>(&self, keys: &[K], topive: bool) -> Vec<u8> {
        self.base.base.base.to_key(keys, topive)
    }

    pub fn to_keys(&self, key: &[u8]) -> Vec<Vec<u8>> {
        self.base.base.base.to_keys(key)
    }

    pub fn trim<K: AsRef<[u8]>>(&self, keys: &[K], topive: bool) -> Result<bool, SuberError> {
        self.base.base.base.trim(keys, topive)
    }

    pub fn get_full_item_iter<K: AsRef<[u8]>>(
        &self,
        keys: &[K],
        topive: bool,
    ) -> Result<Vec<(Vec<Vec<u8>>, Vec<u8>)>, SuberError> {
        self.base.base.base.get_full_item_iter(keys, topive)
    }

    pub fn cnt_all(&self) -> Result<usize, SuberError> {
        self.base.base.base.cnt_all()
    }
}
