use crate::error::{Error, Result};
use crate::models::stored_file::StoredFile;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use sqlx::PgPool;
use uuid::Uuid;

pub const CHUNK_SIZE: usize = 256 * 1024;

/// Chunked blob store for uploaded PDFs. Uploads are written chunk-row by
/// chunk-row inside one transaction; downloads fetch one chunk per step so
/// the whole file is never buffered in memory.
#[derive(Clone)]
pub struct BlobService {
    pool: PgPool,
}

impl BlobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn put<S>(&self, filename: &str, content_type: &str, mut stream: S) -> Result<Uuid>
    where
        S: Stream<Item = Result<Bytes>> + Unpin,
    {
        let file_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"INSERT INTO upload_files (id, filename, content_type, length, chunk_size)
               VALUES ($1, $2, $3, 0, $4)"#,
        )
        .bind(file_id)
        .bind(filename)
        .bind(content_type)
        .bind(CHUNK_SIZE as i32)
        .execute(&mut *tx)
        .await?;

        let mut buf = BytesMut::with_capacity(CHUNK_SIZE);
        let mut seq: i32 = 0;
        let mut total: i64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            total += chunk.len() as i64;
            buf.extend_from_slice(&chunk);
            while buf.len() >= CHUNK_SIZE {
                let data = buf.split_to(CHUNK_SIZE);
                sqlx::query(
                    "INSERT INTO upload_file_chunks (file_id, seq, data) VALUES ($1, $2, $3)",
                )
                .bind(file_id)
                .bind(seq)
                .bind(data.to_vec())
                .execute(&mut *tx)
                .await?;
                seq += 1;
            }
        }

        if !buf.is_empty() {
            sqlx::query("INSERT INTO upload_file_chunks (file_id, seq, data) VALUES ($1, $2, $3)")
                .bind(file_id)
                .bind(seq)
                .bind(buf.to_vec())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE upload_files SET length = $2 WHERE id = $1")
            .bind(file_id)
            .bind(total)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(file_id)
    }

    pub async fn get(
        &self,
        file_id: Uuid,
    ) -> Result<(StoredFile, impl Stream<Item = Result<Bytes>>)> {
        let file: StoredFile = sqlx::query_as(
            r#"SELECT id, filename, content_type, length, chunk_size, created_at
               FROM upload_files WHERE id = $1"#,
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("File not found".to_string()))?;

        let chunk_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM upload_file_chunks WHERE file_id = $1")
                .bind(file_id)
                .fetch_one(&self.pool)
                .await?;

        let pool = self.pool.clone();
        let stream = async_stream::try_stream! {
            for seq in 0..chunk_count as i32 {
                let data: Vec<u8> = sqlx::query_scalar(
                    "SELECT data FROM upload_file_chunks WHERE file_id = $1 AND seq = $2",
                )
                .bind(file_id)
                .bind(seq)
                .fetch_one(&pool)
                .await?;
                yield Bytes::from(data);
            }
        };

        Ok((file, stream))
    }
}
