// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pull-based view of an event stream.

use crate::event_stream::{EventStream, EventStreamExt};
use crate::observer::Observer;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use rebound_core::{ReboundError, StreamItem, Subscription};

/// Extension trait providing [`into_stream`](Self::into_stream).
pub trait IntoStreamExt: EventStream + Sized {
    /// Subscribe and expose the signals as a futures [`Stream`] of [`StreamItem`]s.
    ///
    /// An error is yielded as the last item. Dropping the returned stream disposes the
    /// subscription.
    ///
    /// ```
    /// use futures::StreamExt;
    /// use rebound_stream::prelude::*;
    ///
    /// # futures::executor::block_on(async {
    /// let mut items = just(7).into_stream();
    /// assert_eq!(items.next().await.unwrap().into_result().unwrap(), 7);
    /// assert!(items.next().await.is_none());
    /// # });
    /// ```
    fn into_stream(&self) -> SubscriptionStream<Self::Item> {
        let (sender, receiver) = mpsc::unbounded();
        let subscription = self.subscribe_observer(ChannelObserver { sender });
        SubscriptionStream {
            receiver,
            subscription,
        }
    }
}

impl<S: EventStream> IntoStreamExt for S {}

struct ChannelObserver<T> {
    sender: UnboundedSender<StreamItem<T>>,
}

impl<T: Send + 'static> Observer<T> for ChannelObserver<T> {
    fn on_next(&mut self, value: T) {
        let _ = self.sender.unbounded_send(StreamItem::Value(value));
    }

    fn on_error(&mut self, error: ReboundError) {
        let _ = self.sender.unbounded_send(StreamItem::Error(error));
        self.sender.close_channel();
    }

    fn on_completed(&mut self) {
        self.sender.close_channel();
    }
}

/// Stream returned by [`IntoStreamExt::into_stream`].
pub struct SubscriptionStream<T> {
    receiver: UnboundedReceiver<StreamItem<T>>,
    subscription: Subscription,
}

impl<T> SubscriptionStream<T> {
    /// Handle of the underlying subscription.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Stream for SubscriptionStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl<T> Drop for SubscriptionStream<T> {
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}
