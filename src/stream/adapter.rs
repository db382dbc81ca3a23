use std::{
    pin::Pin,
    task::{Context, Poll, ready},
};

use futures::{Stream, stream::FusedStream};

use crate::signal::Produced;

use super::driver::SlotStream;

/// Plain iteration for sequences without resumption values.
///
/// Each poll resumes with `()`. `Done(r)` ends the stream and keeps `r` for
/// [`SlotStream::take_return`]; an error is yielded once, then the stream ends.
impl<T, R, E> Stream for SlotStream<T, R, (), E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        this.advance(());
        match ready!(this.poll_step(cx)) {
            Some(Ok(Produced::Value(item))) => Poll::Ready(Some(Ok(item))),
            Some(Ok(Produced::Done(value))) => {
                this.set_return(value);
                Poll::Ready(None)
            }
            Some(Err(error)) => Poll::Ready(Some(Err(error))),
            None => Poll::Ready(None),
        }
    }
}

impl<T, R, E> FusedStream for SlotStream<T, R, (), E> {
    fn is_terminated(&self) -> bool {
        self.is_finished()
    }
}
